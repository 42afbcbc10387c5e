//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports describe how the domain expects to interact with external
//! collaborators (the generation backend, the stores, the identity
//! provider); driving ports are the use-case traits HTTP handlers call.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

mod macros;
pub(crate) use macros::define_port_error;

mod documentation_archive;
mod documentation_history_query;
mod generation_backend;
mod generation_command;
mod identity_provider;
mod project_catalog;
mod project_summaries_query;
mod usage_ledger;
mod usage_stats_query;

#[cfg(test)]
pub use documentation_archive::MockDocumentationArchive;
pub use documentation_archive::{
    DocumentationArchive, DocumentationArchiveError, FixtureDocumentationArchive,
};
#[cfg(test)]
pub use documentation_history_query::MockDocumentationHistoryQuery;
pub use documentation_history_query::{DocumentationHistoryQuery, FixtureDocumentationHistoryQuery};
#[cfg(test)]
pub use generation_backend::MockGenerationBackend;
pub use generation_backend::{
    FixtureGenerationBackend, GeneratedDocumentation, GenerationBackend, GenerationBackendError,
};
#[cfg(test)]
pub use generation_command::MockGenerationCommand;
pub use generation_command::{
    BookkeepingStatus, FixtureGenerationCommand, GenerationCommand, GenerationOutcome,
};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use project_catalog::MockProjectCatalog;
pub use project_catalog::{FixtureProjectCatalog, ProjectCatalog, ProjectCatalogError};
#[cfg(test)]
pub use project_summaries_query::MockProjectSummariesQuery;
pub use project_summaries_query::{
    FixtureProjectSummariesQuery, ProjectSummariesQuery, ProjectSummary,
};
#[cfg(test)]
pub use usage_ledger::MockUsageLedger;
pub use usage_ledger::{FixtureUsageLedger, UsageLedger, UsageLedgerError};
#[cfg(test)]
pub use usage_stats_query::MockUsageStatsQuery;
pub use usage_stats_query::{FixtureUsageStatsQuery, UsageStats, UsageStatsQuery};
