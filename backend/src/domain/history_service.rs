//! Recent generation history for the dashboard.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    DocumentationArchive, DocumentationArchiveError, DocumentationHistoryQuery,
};
use crate::domain::{DocumentationRecord, UserId};

/// Maximum number of history entries returned to the dashboard.
pub const HISTORY_LIMIT: usize = 10;

fn map_archive_error(error: DocumentationArchiveError) -> Error {
    match error {
        DocumentationArchiveError::Unavailable { message } => {
            Error::service_unavailable(format!("documentation archive unavailable: {message}"))
        }
    }
}

/// Service implementing [`DocumentationHistoryQuery`] over the archive.
#[derive(Clone)]
pub struct HistoryService<A> {
    archive: Arc<A>,
}

impl<A> HistoryService<A> {
    /// Create the history reader over the documentation archive.
    pub fn new(archive: Arc<A>) -> Self {
        Self { archive }
    }
}

#[async_trait]
impl<A> DocumentationHistoryQuery for HistoryService<A>
where
    A: DocumentationArchive,
{
    async fn history_for(&self, user_id: &UserId) -> Result<Vec<DocumentationRecord>, Error> {
        self.archive
            .query_by_user(user_id, HISTORY_LIMIT)
            .await
            .map_err(map_archive_error)
    }
}
