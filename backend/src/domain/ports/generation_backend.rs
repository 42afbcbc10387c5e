//! Port for the external document-generation backend.
//!
//! The backend is an opaque external service: it accepts a snippet plus
//! language tag and returns documentation text. Calls have unknown latency
//! and carry no idempotency guarantee, so adapters make exactly one attempt
//! per request and nothing in the stack retries on their behalf.

use async_trait::async_trait;

use crate::domain::GenerationRequest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by generation backend adapters.
    pub enum GenerationBackendError {
        /// The request did not complete within the adapter's deadline.
        Timeout { message: String } =>
            "generation backend timed out: {message}",
        /// Transport-level failure before a response was received.
        Transport { message: String } =>
            "generation backend transport failed: {message}",
        /// The backend answered with a non-success status.
        Status { status: u16, message: String } =>
            "generation backend returned status {status}: {message}",
        /// The response body could not be decoded into documentation text.
        Decode { message: String } =>
            "generation backend response could not be decoded: {message}",
    }
}

/// Documentation text produced by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocumentation {
    /// The generated documentation, exactly as the backend returned it.
    pub documentation: String,
}

/// Port for invoking the external generation service.
///
/// # At-most-once semantics
///
/// Implementations perform a single attempt per call. A timeout or transport
/// failure after the request was sent may still have been billed by the
/// backend; callers treat every failure as final.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Request documentation for the given snippet.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedDocumentation, GenerationBackendError>;
}

/// Fixture implementation for wiring tests and doctests.
///
/// Returns a canned documentation string without any I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGenerationBackend;

#[async_trait]
impl GenerationBackend for FixtureGenerationBackend {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GeneratedDocumentation, GenerationBackendError> {
        Ok(GeneratedDocumentation {
            documentation: "Fixture documentation.".to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CodeSnippet, LanguageTag};

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            CodeSnippet::new("print(1)").expect("valid code"),
            LanguageTag::new("python").expect("valid language"),
        )
    }

    #[tokio::test]
    async fn fixture_backend_returns_canned_text() {
        let backend = FixtureGenerationBackend;
        let generated = backend.generate(&request()).await.expect("fixture succeeds");
        assert!(!generated.documentation.is_empty());
    }

    #[test]
    fn status_errors_format_with_code() {
        let err = GenerationBackendError::status(502_u16, "bad gateway");
        assert_eq!(
            err.to_string(),
            "generation backend returned status 502: bad gateway"
        );
    }
}
