//! Domain primitives, services, and ports.
//!
//! Purpose: hold everything transport-agnostic: validated value types, the
//! persisted record shapes, the port traits at the hexagon's edge, and the
//! services that implement the driving ports. Identity is always an explicit
//! [`UserId`] parameter; nothing in this module reads ambient session state.

pub mod auth;
pub mod error;
pub mod generation_service;
pub mod history_service;
pub mod ports;
pub mod project_summary_service;
pub mod records;
pub mod snippet;
pub mod trace_id;
pub mod usage_stats_service;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::generation_service::GenerationService;
pub use self::history_service::{HISTORY_LIMIT, HistoryService};
pub use self::project_summary_service::{PROJECT_LIST_LIMIT, ProjectSummaryService};
pub use self::records::{
    DocumentationDraft, DocumentationRecord, Project, UsageDraft, UsageRecord,
};
pub use self::snippet::{
    CodeSnippet, GenerationRequest, LanguageTag, MAX_CODE_CHARS, SnippetValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::usage_stats_service::{USAGE_WINDOW, UsageStatsService};
pub use self::user::{UserId, UserIdValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
