//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DocumentationHistoryQuery, GenerationCommand, IdentityProvider, ProjectSummariesQuery,
    UsageStatsQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::ports::{
///     FixtureDocumentationHistoryQuery, FixtureGenerationCommand, FixtureIdentityProvider,
///     FixtureProjectSummariesQuery, FixtureUsageStatsQuery,
/// };
/// use backend::inbound::http::state::HttpState;
///
/// let state = HttpState {
///     generation: Arc::new(FixtureGenerationCommand),
///     usage_stats: Arc::new(FixtureUsageStatsQuery),
///     project_summaries: Arc::new(FixtureProjectSummariesQuery),
///     history: Arc::new(FixtureDocumentationHistoryQuery),
///     identity: Arc::new(FixtureIdentityProvider),
/// };
/// let _generation = state.generation.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Generation orchestrator.
    pub generation: Arc<dyn GenerationCommand>,
    /// Windowed usage statistics.
    pub usage_stats: Arc<dyn UsageStatsQuery>,
    /// Project listing with derived counts.
    pub project_summaries: Arc<dyn ProjectSummariesQuery>,
    /// Recent generation history.
    pub history: Arc<dyn DocumentationHistoryQuery>,
    /// Credential verification collaborator.
    pub identity: Arc<dyn IdentityProvider>,
}
