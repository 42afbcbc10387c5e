//! Driving port for per-project dashboard summaries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, UserId};

/// One project row on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    /// Stable project identifier.
    pub id: Uuid,
    /// Display name chosen by the owner.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Project creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Live count of archive records linked to this project.
    ///
    /// `None` signals the count query failed for this one project; the rest
    /// of the listing is still served. Derived on every read: there is no
    /// stored counter to drift out of sync with the archive.
    pub docs_count: Option<u64>,
}

/// Driving port building the caller's project listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectSummariesQuery: Send + Sync {
    /// List the caller's newest projects with derived documentation counts.
    ///
    /// Output order always follows catalog order (newest first) regardless
    /// of the completion order of the per-project count queries.
    async fn summaries_for(&self, user_id: &UserId) -> Result<Vec<ProjectSummary>, Error>;
}

/// Fixture implementation for wiring tests and doctests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectSummariesQuery;

#[async_trait]
impl ProjectSummariesQuery for FixtureProjectSummariesQuery {
    async fn summaries_for(&self, _user_id: &UserId) -> Result<Vec<ProjectSummary>, Error> {
        Ok(Vec::new())
    }
}
