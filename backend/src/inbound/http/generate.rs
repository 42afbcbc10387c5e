//! Generation API handler.
//!
//! ```text
//! POST /api/v1/generate {"code":"print(1)","language":"python"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{BookkeepingStatus, GenerationOutcome};
use crate::domain::{CodeSnippet, Error, GenerationRequest, LanguageTag, SnippetValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, empty_field_error, field_too_long_error, missing_field_error, parse_uuid,
};

const CODE_FIELD: FieldName = FieldName::new("code");
const LANGUAGE_FIELD: FieldName = FieldName::new("language");
const PROJECT_ID_FIELD: FieldName = FieldName::new("projectId");

/// Request body for `POST /api/v1/generate`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Source text to document.
    pub code: Option<String>,
    /// Language tag of the snippet. Unknown tags are forwarded unchanged.
    pub language: Option<String>,
    /// Optional project to file the generation under.
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Warning attached when the generation succeeded but bookkeeping did not.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWarning {
    /// Stable machine-readable warning code.
    #[schema(example = "bookkeeping_failed")]
    pub code: String,
    /// Short description of what was not recorded.
    pub message: String,
}

/// Response body for `POST /api/v1/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Generated documentation text, exactly as the backend produced it.
    pub documentation: String,
    /// Whether the generation event was durably recorded.
    pub saved: bool,
    /// Present only when `saved` is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<GenerateWarning>,
}

impl From<GenerationOutcome> for GenerateResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        match outcome.bookkeeping {
            BookkeepingStatus::Saved => Self {
                documentation: outcome.documentation,
                saved: true,
                warning: None,
            },
            BookkeepingStatus::Unsaved { detail } => Self {
                documentation: outcome.documentation,
                saved: false,
                warning: Some(GenerateWarning {
                    code: "bookkeeping_failed".to_owned(),
                    message: detail,
                }),
            },
        }
    }
}

fn map_snippet_error(error: SnippetValidationError, field: FieldName) -> Error {
    match error {
        SnippetValidationError::EmptyCode | SnippetValidationError::EmptyLanguage => {
            empty_field_error(field)
        }
        SnippetValidationError::CodeTooLong { max } => field_too_long_error(field, max),
    }
}

fn parse_generation_request(
    payload: GenerateRequest,
) -> Result<(GenerationRequest, Option<Uuid>), Error> {
    let code = payload
        .code
        .ok_or_else(|| missing_field_error(CODE_FIELD))?;
    let language = payload
        .language
        .ok_or_else(|| missing_field_error(LANGUAGE_FIELD))?;

    let code = CodeSnippet::new(code).map_err(|err| map_snippet_error(err, CODE_FIELD))?;
    let language =
        LanguageTag::new(language).map_err(|err| map_snippet_error(err, LANGUAGE_FIELD))?;
    let project_id = payload
        .project_id
        .as_deref()
        .map(|raw| parse_uuid(raw, PROJECT_ID_FIELD))
        .transpose()?;

    Ok((GenerationRequest::new(code, language), project_id))
}

/// Generate documentation for a code snippet.
///
/// Validation failures and missing authentication are rejected before the
/// backend is contacted. When the backend succeeds but a bookkeeping write
/// fails, the response still carries the documentation with `saved: false`:
/// the generation is costly and non-repeatable, so it is never discarded for
/// a persistence hiccup.
#[utoipa::path(
    post,
    path = "/api/v1/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated documentation", body = GenerateResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Generation backend failure", body = ErrorSchema)
    ),
    tags = ["generation"],
    operation_id = "generateDocumentation"
)]
#[post("/generate")]
pub async fn generate(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GenerateRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let (request, project_id) = parse_generation_request(payload.into_inner())?;

    let outcome = state.generation.generate(user_id, request, project_id).await?;
    Ok(HttpResponse::Ok().json(GenerateResponse::from(outcome)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse as TestHttpResponse, test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{MAX_CODE_CHARS, UserId};
    use crate::domain::ports::{
        FixtureDocumentationHistoryQuery, FixtureIdentityProvider, FixtureProjectSummariesQuery,
        FixtureUsageStatsQuery, GenerationCommand, MockGenerationCommand,
    };
    use crate::inbound::http::test_utils::test_session_middleware;

    fn state_with_generation(generation: impl GenerationCommand + 'static) -> HttpState {
        HttpState {
            generation: Arc::new(generation),
            usage_stats: Arc::new(FixtureUsageStatsQuery),
            project_summaries: Arc::new(FixtureProjectSummariesQuery),
            history: Arc::new(FixtureDocumentationHistoryQuery),
            identity: Arc::new(FixtureIdentityProvider),
        }
    }

    async fn call_generate(
        generation: MockGenerationCommand,
        authenticated: bool,
        body: Value,
    ) -> (StatusCode, Value) {
        let state = web::Data::new(state_with_generation(generation));
        let app = test::init_service(
            App::new()
                .app_data(state)
                .wrap(test_session_middleware())
                .route(
                    "/test-login",
                    web::get().to(|session: SessionContext| async move {
                        let id = UserId::random();
                        session.persist_user(&id)?;
                        Ok::<_, Error>(TestHttpResponse::Ok())
                    }),
                )
                .service(generate),
        )
        .await;

        let mut request = test::TestRequest::post().uri("/generate").set_json(&body);
        if authenticated {
            let login = test::call_service(
                &app,
                test::TestRequest::get().uri("/test-login").to_request(),
            )
            .await;
            let cookie = login
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .expect("session cookie set");
            request = request.cookie(cookie);
        }

        let response = test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body: Value = test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn unauthenticated_requests_invoke_no_collaborator() {
        let mut generation = MockGenerationCommand::new();
        generation.expect_generate().times(0);

        let (status, body) = call_generate(
            generation,
            false,
            json!({ "code": "print(1)", "language": "python" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn blank_code_is_rejected_before_the_backend() {
        let mut generation = MockGenerationCommand::new();
        generation.expect_generate().times(0);

        let (status, body) = call_generate(
            generation,
            true,
            json!({ "code": "   ", "language": "python" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], "code");
    }

    #[actix_web::test]
    async fn missing_language_is_rejected_before_the_backend() {
        let mut generation = MockGenerationCommand::new();
        generation.expect_generate().times(0);

        let (status, body) =
            call_generate(generation, true, json!({ "code": "print(1)" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "language");
        assert_eq!(body["details"]["code"], "missing_field");
    }

    #[actix_web::test]
    async fn malformed_project_id_is_rejected() {
        let mut generation = MockGenerationCommand::new();
        generation.expect_generate().times(0);

        let (status, body) = call_generate(
            generation,
            true,
            json!({ "code": "print(1)", "language": "python", "projectId": "nope" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["code"], "invalid_uuid");
    }

    #[actix_web::test]
    async fn successful_generation_returns_the_backend_text_unchanged() {
        let mut generation = MockGenerationCommand::new();
        generation
            .expect_generate()
            .times(1)
            .withf(|_, request, project_id| {
                request.code().as_str() == "print(1)"
                    && request.language().as_str() == "python"
                    && project_id.is_none()
            })
            .return_once(|_, _, _| {
                Ok(GenerationOutcome {
                    documentation: "Prints 1".to_owned(),
                    bookkeeping: BookkeepingStatus::Saved,
                })
            });

        let (status, body) = call_generate(
            generation,
            true,
            json!({ "code": "print(1)", "language": "python" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["documentation"], "Prints 1");
        assert_eq!(body["saved"], true);
        assert!(body.get("warning").is_none());
    }

    #[actix_web::test]
    async fn partial_success_flags_the_unsaved_bookkeeping() {
        let mut generation = MockGenerationCommand::new();
        generation.expect_generate().times(1).return_once(|_, _, _| {
            Ok(GenerationOutcome {
                documentation: "Prints 1".to_owned(),
                bookkeeping: BookkeepingStatus::Unsaved {
                    detail: "usage record not saved".to_owned(),
                },
            })
        });

        let (status, body) = call_generate(
            generation,
            true,
            json!({ "code": "print(1)", "language": "python" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["saved"], false);
        assert_eq!(body["warning"]["code"], "bookkeeping_failed");
    }

    #[actix_web::test]
    async fn backend_failure_surfaces_as_a_server_error() {
        let mut generation = MockGenerationCommand::new();
        generation
            .expect_generate()
            .times(1)
            .return_once(|_, _, _| Err(Error::backend_failure("documentation generation failed")));

        let (status, body) = call_generate(
            generation,
            true,
            json!({ "code": "print(1)", "language": "python" }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "backend_failure");
    }

    #[::core::prelude::v1::test]
    fn oversized_code_maps_to_field_too_long() {
        let payload = GenerateRequest {
            code: Some("x".repeat(MAX_CODE_CHARS + 1)),
            language: Some("python".to_owned()),
            project_id: None,
        };
        let error = parse_generation_request(payload).expect_err("oversized code fails");
        let details = error.details().expect("details attached");
        assert_eq!(details["code"], "field_too_long");
    }
}
