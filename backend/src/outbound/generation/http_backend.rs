//! Reqwest-backed generation backend adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into the domain response. It
//! performs exactly one attempt per call; the service it fronts bills per
//! invocation and offers no idempotency.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{GenerateRequestDto, GenerateResponseDto};
use crate::domain::GenerationRequest;
use crate::domain::ports::{GeneratedDocumentation, GenerationBackend, GenerationBackendError};

/// Generation backend adapter performing HTTP POST requests against one
/// endpoint.
pub struct GenerationHttpBackend {
    client: Client,
    endpoint: Url,
}

impl GenerationHttpBackend {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// The timeout bounds the whole call; the orchestrator treats an elapsed
    /// deadline as a final backend failure, never as a cue to retry.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl GenerationBackend for GenerationHttpBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedDocumentation, GenerationBackendError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GenerateRequestDto::from(request))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_documentation(body.as_ref())
    }
}

fn parse_documentation(body: &[u8]) -> Result<GeneratedDocumentation, GenerationBackendError> {
    let decoded: GenerateResponseDto = serde_json::from_slice(body).map_err(|error| {
        GenerationBackendError::decode(format!("invalid generation JSON payload: {error}"))
    })?;
    if decoded.documentation.trim().is_empty() {
        return Err(GenerationBackendError::decode(
            "generation response contained no documentation text",
        ));
    }
    Ok(GeneratedDocumentation {
        documentation: decoded.documentation,
    })
}

fn map_transport_error(error: reqwest::Error) -> GenerationBackendError {
    if error.is_timeout() {
        GenerationBackendError::timeout(error.to_string())
    } else {
        GenerationBackendError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GenerationBackendError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GenerationBackendError::timeout(message)
        }
        _ => GenerationBackendError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
