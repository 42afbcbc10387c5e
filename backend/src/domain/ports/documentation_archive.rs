//! Port for the append-only documentation archive.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{DocumentationDraft, DocumentationRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by documentation archive adapters.
    pub enum DocumentationArchiveError {
        /// The archive store could not be reached or the operation failed
        /// transiently. Appends are all-or-nothing: this error guarantees no
        /// partial write happened.
        Unavailable { message: String } =>
            "documentation archive unavailable: {message}",
    }
}

/// Port for storing and reading archived generation results.
///
/// # Ordering contract
///
/// Both queries return records newest first, ordered by creation timestamp
/// with ties broken by insertion order. `query_by_user` truncates to
/// `limit`; `query_by_project` is deliberately unbounded because it backs
/// the derived per-project documentation count.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentationArchive: Send + Sync {
    /// Append one documentation record; the archive assigns id and timestamp.
    async fn append(
        &self,
        draft: DocumentationDraft,
    ) -> Result<DocumentationRecord, DocumentationArchiveError>;

    /// Read the caller's most recent documentation records, newest first.
    async fn query_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<DocumentationRecord>, DocumentationArchiveError>;

    /// Read every record linked to the given project, newest first.
    async fn query_by_project(
        &self,
        project_id: &Uuid,
    ) -> Result<Vec<DocumentationRecord>, DocumentationArchiveError>;
}

/// Fixture implementation for wiring tests and doctests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDocumentationArchive;

#[async_trait]
impl DocumentationArchive for FixtureDocumentationArchive {
    async fn append(
        &self,
        draft: DocumentationDraft,
    ) -> Result<DocumentationRecord, DocumentationArchiveError> {
        Ok(DocumentationRecord {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            project_id: draft.project_id,
            original_code: draft.original_code,
            generated_documentation: draft.generated_documentation,
            language: draft.language,
            ai_model: draft.ai_model,
            created_at: Utc::now(),
        })
    }

    async fn query_by_user(
        &self,
        _user_id: &UserId,
        _limit: usize,
    ) -> Result<Vec<DocumentationRecord>, DocumentationArchiveError> {
        Ok(Vec::new())
    }

    async fn query_by_project(
        &self,
        _project_id: &Uuid,
    ) -> Result<Vec<DocumentationRecord>, DocumentationArchiveError> {
        Ok(Vec::new())
    }
}
