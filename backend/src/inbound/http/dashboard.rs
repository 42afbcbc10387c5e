//! Dashboard API handlers.
//!
//! ```text
//! GET /api/v1/dashboard/usage
//! GET /api/v1/dashboard/projects
//! GET /api/v1/dashboard/history
//! ```
//!
//! All three are derived reads: usage counts fold the ledger window, project
//! counts are live archive queries, history is the newest slice of the
//! archive. Nothing here is cached or mutated.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::DocumentationRecord;
use crate::domain::ports::{ProjectSummary, UsageStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Response body for `GET /api/v1/dashboard/usage`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatsResponse {
    /// Generation events counted inside the aggregation window.
    pub total_documentations: u64,
    /// Per-language counts inside the window.
    pub languages: BTreeMap<String, u64>,
}

impl From<UsageStats> for UsageStatsResponse {
    fn from(stats: UsageStats) -> Self {
        Self {
            total_documentations: stats.total,
            languages: stats.by_language,
        }
    }
}

/// One project row in `GET /api/v1/dashboard/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryResponse {
    /// Stable project identifier.
    pub id: String,
    /// Display name chosen by the owner.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Project creation timestamp, RFC 3339.
    pub created_at: String,
    /// Live count of documentation records linked to this project.
    pub docs_count: u64,
}

impl From<ProjectSummary> for ProjectSummaryResponse {
    fn from(summary: ProjectSummary) -> Self {
        let docs_count = summary.docs_count.unwrap_or_else(|| {
            warn!(project_id = %summary.id, "serving degraded documentation count as zero");
            0
        });
        Self {
            id: summary.id.to_string(),
            name: summary.name,
            description: summary.description,
            created_at: summary.created_at.to_rfc3339(),
            docs_count,
        }
    }
}

/// One history row in `GET /api/v1/dashboard/history`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    /// Stable record identifier.
    pub id: String,
    /// Project the generation was filed under, if any.
    pub project_id: Option<String>,
    /// Source text exactly as submitted.
    pub original_code: String,
    /// Generated documentation text.
    pub generated_documentation: String,
    /// Language tag of the documented snippet.
    pub language: String,
    /// Identifier of the model that produced the documentation.
    pub ai_model: String,
    /// Append timestamp, RFC 3339.
    pub created_at: String,
}

impl From<DocumentationRecord> for HistoryEntryResponse {
    fn from(record: DocumentationRecord) -> Self {
        Self {
            id: record.id.to_string(),
            project_id: record.project_id.map(|id| id.to_string()),
            original_code: record.original_code,
            generated_documentation: record.generated_documentation,
            language: record.language,
            ai_model: record.ai_model,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Fetch the authenticated user's usage statistics.
///
/// Counts are folded over the most recent ledger window, so totals
/// understate lifetime usage for heavy users; the window keeps the derived
/// read cheap.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/usage",
    responses(
        (status = 200, description = "Usage statistics", body = UsageStatsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getUsageStats"
)]
#[get("/dashboard/usage")]
pub async fn get_usage(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let stats = state.usage_stats.stats_for(&user_id).await?;
    Ok(HttpResponse::Ok().json(UsageStatsResponse::from(stats)))
}

/// List the authenticated user's newest projects with documentation counts.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/projects",
    responses(
        (status = 200, description = "Project summaries", body = [ProjectSummaryResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "listProjectSummaries"
)]
#[get("/dashboard/projects")]
pub async fn get_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let summaries = state.project_summaries.summaries_for(&user_id).await?;
    let payload: Vec<ProjectSummaryResponse> = summaries
        .into_iter()
        .map(ProjectSummaryResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(payload))
}

/// List the authenticated user's most recent generations.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/history",
    responses(
        (status = 200, description = "Recent generations", body = [HistoryEntryResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "listGenerationHistory"
)]
#[get("/dashboard/history")]
pub async fn get_history(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let records = state.history.history_for(&user_id).await?;
    let payload: Vec<HistoryEntryResponse> = records
        .into_iter()
        .map(HistoryEntryResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(payload))
}
