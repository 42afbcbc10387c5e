//! Session API handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! ```
//!
//! Credential verification is delegated to the identity-provider port; the
//! handlers only translate payloads and manage the session cookie.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::IdentityProviderError;
use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"username":"admin","password":"password"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account name known to the identity provider.
    pub username: String,
    /// Account password; verified by the identity provider, never stored.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Response body for `GET /api/v1/users/me`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    /// Opaque identifier issued by the identity provider.
    pub id: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn map_identity_error(err: IdentityProviderError) -> Error {
    match err {
        IdentityProviderError::InvalidCredentials => Error::unauthorized("invalid credentials"),
        IdentityProviderError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

/// Authenticate the caller and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state
        .identity
        .verify(&credentials)
        .await
        .map_err(map_identity_error)?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Drop the caller's session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Return the authenticated caller's identity.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(session: SessionContext) -> ApiResult<web::Json<CurrentUserResponse>> {
    let user_id = session.require_user_id()?;
    Ok(web::Json(CurrentUserResponse {
        id: user_id.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::UserId;
    use crate::domain::ports::{
        FixtureDocumentationHistoryQuery, FixtureGenerationCommand, FixtureIdentityProvider,
        FixtureProjectSummariesQuery, FixtureUsageStatsQuery, MockIdentityProvider,
    };
    use crate::inbound::http::test_utils::test_session_middleware;

    fn state_with_identity(identity: Arc<dyn crate::domain::ports::IdentityProvider>) -> HttpState {
        HttpState {
            generation: Arc::new(FixtureGenerationCommand),
            usage_stats: Arc::new(FixtureUsageStatsQuery),
            project_summaries: Arc::new(FixtureProjectSummariesQuery),
            history: Arc::new(FixtureDocumentationHistoryQuery),
            identity,
        }
    }

    fn auth_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(login)
            .service(logout)
            .service(current_user)
    }

    #[actix_web::test]
    async fn login_establishes_a_session_usable_for_me() {
        let resolved = UserId::random();
        let expected = resolved.clone();
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_verify()
            .times(1)
            .return_once(move |_| Ok(resolved));

        let app =
            test::init_service(auth_app(state_with_identity(Arc::new(identity)))).await;

        let login_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "username": "admin", "password": "password" }))
                .to_request(),
        )
        .await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let me_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me_res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(me_res).await;
        assert_eq!(body["id"], expected.to_string());
    }

    #[actix_web::test]
    async fn rejected_credentials_yield_401() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_verify()
            .times(1)
            .return_once(|_| Err(IdentityProviderError::invalid_credentials()));

        let app =
            test::init_service(auth_app(state_with_identity(Arc::new(identity)))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "username": "admin", "password": "wrong" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blank_username_never_reaches_the_provider() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_verify().times(0);

        let app =
            test::init_service(auth_app(state_with_identity(Arc::new(identity)))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "username": "  ", "password": "pw" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "empty_username");
    }

    #[actix_web::test]
    async fn me_without_a_session_is_unauthorised() {
        let app = test::init_service(auth_app(state_with_identity(Arc::new(
            FixtureIdentityProvider,
        ))))
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/users/me").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let app = test::init_service(auth_app(state_with_identity(Arc::new(
            FixtureIdentityProvider,
        ))))
        .await;

        let login_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "username": "admin", "password": "password" }))
                .to_request(),
        )
        .await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let logout_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);

        let cleared_cookie = logout_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie rewritten");
        let me_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/users/me")
                .cookie(cleared_cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me_res.status(), StatusCode::UNAUTHORIZED);
    }
}
