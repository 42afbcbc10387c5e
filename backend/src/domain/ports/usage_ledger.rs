//! Port for the append-only usage ledger.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{UsageDraft, UsageRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by usage ledger adapters.
    pub enum UsageLedgerError {
        /// The ledger store could not be reached or the operation failed
        /// transiently. Appends are all-or-nothing: this error guarantees no
        /// partial write happened.
        Unavailable { message: String } =>
            "usage ledger unavailable: {message}",
    }
}

/// Port for recording and reading per-user generation events.
///
/// # Ordering contract
///
/// `query_by_user` returns records newest first, ordered by creation
/// timestamp with ties broken by insertion order, truncated to `limit`.
/// Callers must not assume more than `limit` records exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageLedger: Send + Sync {
    /// Append one usage event; the ledger assigns the id and timestamp.
    async fn append(&self, draft: UsageDraft) -> Result<UsageRecord, UsageLedgerError>;

    /// Read the caller's most recent usage events, newest first.
    async fn query_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<UsageRecord>, UsageLedgerError>;
}

/// Fixture implementation for wiring tests and doctests.
///
/// Accepts appends (echoing the draft back as a stamped record) and reports
/// an empty history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsageLedger;

#[async_trait]
impl UsageLedger for FixtureUsageLedger {
    async fn append(&self, draft: UsageDraft) -> Result<UsageRecord, UsageLedgerError> {
        Ok(UsageRecord {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            language: draft.language,
            created_at: Utc::now(),
        })
    }

    async fn query_by_user(
        &self,
        _user_id: &UserId,
        _limit: usize,
    ) -> Result<Vec<UsageRecord>, UsageLedgerError> {
        Ok(Vec::new())
    }
}
