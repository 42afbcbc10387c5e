//! Windowed usage aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{UsageLedger, UsageLedgerError, UsageStats, UsageStatsQuery};
use crate::domain::UserId;

/// Number of newest ledger entries folded into the statistics.
///
/// Reading a bounded window keeps the derived counts cheap; beyond the
/// window `total` understates lifetime usage, which is the documented
/// accuracy/cost trade-off.
pub const USAGE_WINDOW: usize = 50;

fn map_ledger_error(error: UsageLedgerError) -> Error {
    match error {
        UsageLedgerError::Unavailable { message } => {
            Error::service_unavailable(format!("usage ledger unavailable: {message}"))
        }
    }
}

/// Service implementing [`UsageStatsQuery`] over the ledger.
#[derive(Clone)]
pub struct UsageStatsService<L> {
    ledger: Arc<L>,
}

impl<L> UsageStatsService<L> {
    /// Create the aggregator over a usage ledger.
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl<L> UsageStatsQuery for UsageStatsService<L>
where
    L: UsageLedger,
{
    async fn stats_for(&self, user_id: &UserId) -> Result<UsageStats, Error> {
        let records = self
            .ledger
            .query_by_user(user_id, USAGE_WINDOW)
            .await
            .map_err(map_ledger_error)?;

        let mut by_language: BTreeMap<String, u64> = BTreeMap::new();
        for record in &records {
            *by_language.entry(record.language.clone()).or_insert(0) += 1;
        }

        Ok(UsageStats {
            total: records.len() as u64,
            by_language,
        })
    }
}

#[cfg(test)]
#[path = "usage_stats_service_tests.rs"]
mod tests;
