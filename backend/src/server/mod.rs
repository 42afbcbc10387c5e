//! Server construction and middleware wiring.

mod config;

pub use config::Settings;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::FixtureIdentityProvider;
use backend::domain::{GenerationService, HistoryService, ProjectSummaryService, UsageStatsService};
use backend::inbound::http::auth::{current_user, login, logout};
use backend::inbound::http::dashboard::{get_history, get_projects, get_usage};
use backend::inbound::http::generate::generate;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::generation::GenerationHttpBackend;
use backend::outbound::memory::{
    MemoryDocumentationArchive, MemoryProjectCatalog, MemoryUsageLedger,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Assemble the port implementations the HTTP handlers depend on.
///
/// The generation backend is the reqwest adapter against the configured
/// endpoint; the stores are the in-process adapters; credential checks use
/// the fixture identity provider until a real provider adapter is wired in.
fn build_http_state(settings: &Settings) -> std::io::Result<HttpState> {
    let backend_url = settings
        .backend_url()
        .map_err(|e| std::io::Error::other(format!("invalid backend url: {e}")))?;
    let generation_backend =
        GenerationHttpBackend::new(backend_url, settings.backend_timeout()).map_err(|e| {
            std::io::Error::other(format!("failed to build generation client: {e}"))
        })?;

    let ledger = Arc::new(MemoryUsageLedger::new());
    let archive = Arc::new(MemoryDocumentationArchive::new());
    let catalog = Arc::new(MemoryProjectCatalog::new());

    Ok(HttpState {
        generation: Arc::new(GenerationService::new(
            Arc::new(generation_backend),
            ledger.clone(),
            archive.clone(),
            settings.generation_model(),
        )),
        usage_stats: Arc::new(UsageStatsService::new(ledger)),
        project_summaries: Arc::new(ProjectSummaryService::new(catalog, archive.clone())),
        history: Arc::new(HistoryService::new(archive)),
        identity: Arc::new(FixtureIdentityProvider),
    })
}

/// Load the session signing key, tolerating a missing file in development.
fn load_session_key(settings: &Settings) -> std::io::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {e}",
                    key_path.display()
                )))
            }
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(current_user)
        .service(generate)
        .service(get_usage)
        .service(get_projects)
        .service(get_history);

    #[cfg_attr(not(debug_assertions), expect(unused_mut, reason = "Swagger UI is debug-only"))]
    let mut app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app
}

/// Run the HTTP server until shutdown.
pub async fn run(settings: Settings) -> std::io::Result<()> {
    let key = load_session_key(&settings)?;
    let cookie_secure = settings.cookie_secure();
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let http_state = web::Data::new(build_http_state(&settings)?);
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
