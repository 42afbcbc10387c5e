//! In-process usage ledger adapter.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{UsageLedger, UsageLedgerError};
use crate::domain::{UsageDraft, UsageRecord, UserId};

/// Append-only usage ledger held in process memory.
///
/// Preserves the store contract the domain relies on: appends stamp id and
/// timestamp atomically, and reads return records newest first with ties on
/// the timestamp broken by insertion order (later append first).
#[derive(Debug, Default)]
pub struct MemoryUsageLedger {
    rows: RwLock<Vec<(u64, UsageRecord)>>,
}

impl MemoryUsageLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsageLedger for MemoryUsageLedger {
    async fn append(&self, draft: UsageDraft) -> Result<UsageRecord, UsageLedgerError> {
        let mut rows = self.rows.write().await;
        let record = UsageRecord {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            language: draft.language,
            created_at: Utc::now(),
        };
        let seq = rows.len() as u64;
        rows.push((seq, record.clone()));
        Ok(record)
    }

    async fn query_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<UsageRecord>, UsageLedgerError> {
        let rows = self.rows.read().await;
        let mut matching: Vec<&(u64, UsageRecord)> = rows
            .iter()
            .filter(|(_, record)| &record.user_id == user_id)
            .collect();
        matching.sort_by_key(|(seq, record)| std::cmp::Reverse((record.created_at, *seq)));
        Ok(matching
            .into_iter()
            .take(limit)
            .map(|(_, record)| record.clone())
            .collect())
    }
}
