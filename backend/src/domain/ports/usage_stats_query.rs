//! Driving port for usage statistics.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// Usage statistics derived from the ledger.
///
/// Counts are computed over a bounded window of the most recent ledger
/// entries, so `total` understates true lifetime usage once a user exceeds
/// the window. That approximation is contractual; see
/// [`UsageStatsQuery::stats_for`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageStats {
    /// Number of generation events inside the window.
    pub total: u64,
    /// Per-language event counts inside the window.
    pub by_language: BTreeMap<String, u64>,
}

/// Driving port computing a user's usage statistics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageStatsQuery: Send + Sync {
    /// Fold the caller's most recent ledger entries into summary counts.
    ///
    /// Reads at most the window of newest records; for users beyond the
    /// window, `total` reflects only that window. Implementations must not
    /// silently make the count exact.
    async fn stats_for(&self, user_id: &UserId) -> Result<UsageStats, Error>;
}

/// Fixture implementation for wiring tests and doctests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsageStatsQuery;

#[async_trait]
impl UsageStatsQuery for FixtureUsageStatsQuery {
    async fn stats_for(&self, _user_id: &UserId) -> Result<UsageStats, Error> {
        Ok(UsageStats::default())
    }
}
