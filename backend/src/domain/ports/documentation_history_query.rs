//! Driving port for the caller's recent generation history.

use async_trait::async_trait;

use crate::domain::{DocumentationRecord, Error, UserId};

/// Driving port reading the caller's newest archived generations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentationHistoryQuery: Send + Sync {
    /// Return the caller's most recent documentation records, newest first.
    async fn history_for(&self, user_id: &UserId) -> Result<Vec<DocumentationRecord>, Error>;
}

/// Fixture implementation for wiring tests and doctests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDocumentationHistoryQuery;

#[async_trait]
impl DocumentationHistoryQuery for FixtureDocumentationHistoryQuery {
    async fn history_for(&self, _user_id: &UserId) -> Result<Vec<DocumentationRecord>, Error> {
        Ok(Vec::new())
    }
}
