//! In-process store adapters.
//!
//! The deployment's document store is an external collaborator; these
//! adapters implement the same port contracts (equality filters, descending
//! timestamp order with insertion-order ties, result limits) over
//! process-local state so the service runs without external infrastructure.

mod documentation_archive;
mod project_catalog;
mod usage_ledger;

pub use documentation_archive::MemoryDocumentationArchive;
pub use project_catalog::MemoryProjectCatalog;
pub use usage_ledger::MemoryUsageLedger;
