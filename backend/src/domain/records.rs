//! Persisted record shapes.
//!
//! Purpose: define the immutable entities the stores hold. Usage and
//! documentation records are append-only log entries: once a store has
//! stamped an id and timestamp onto a draft, the record is never updated or
//! deleted. The two records written for one generation event carry no
//! foreign key to each other; they are correlated only by owner and
//! timestamp proximity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// User-owned project grouping generated documentation.
///
/// Projects are created by an explicit user action outside this core and are
/// never hard-deleted; the catalog port only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable project identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    /// Display name chosen by the owner.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// One successful generation event in the usage ledger.
///
/// The sole source for usage statistics: totals are derived by counting
/// these entries, never by mutating a stored counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Stable record identifier, assigned by the ledger on append.
    pub id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    /// Language tag of the documented snippet.
    pub language: String,
    /// Append timestamp, assigned by the ledger.
    pub created_at: DateTime<Utc>,
}

/// Fields the orchestrator supplies when appending a usage record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageDraft {
    /// Owning user.
    pub user_id: UserId,
    /// Language tag of the documented snippet.
    pub language: String,
}

/// Archived generation result, optionally linked to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationRecord {
    /// Stable record identifier, assigned by the archive on append.
    pub id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    /// Project this generation belongs to, if any.
    pub project_id: Option<Uuid>,
    /// Source text exactly as submitted.
    pub original_code: String,
    /// Documentation text returned by the backend.
    pub generated_documentation: String,
    /// Language tag of the documented snippet.
    pub language: String,
    /// Identifier of the model that produced the documentation.
    pub ai_model: String,
    /// Append timestamp, assigned by the archive.
    pub created_at: DateTime<Utc>,
}

/// Fields the orchestrator supplies when appending a documentation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationDraft {
    /// Owning user.
    pub user_id: UserId,
    /// Project this generation belongs to, if any.
    pub project_id: Option<Uuid>,
    /// Source text exactly as submitted.
    pub original_code: String,
    /// Documentation text returned by the backend.
    pub generated_documentation: String,
    /// Language tag of the documented snippet.
    pub language: String,
    /// Identifier of the model that produced the documentation.
    pub ai_model: String,
}
