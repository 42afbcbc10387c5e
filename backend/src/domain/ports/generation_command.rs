//! Driving port for documentation generation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, GenerationRequest, UserId};

/// How the bookkeeping writes for a generation fared.
///
/// The generated text is returned to the caller either way: discarding a
/// paid-for, non-repeatable generation because a store write failed would
/// turn a bookkeeping hiccup into data loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookkeepingStatus {
    /// Both the usage ledger and the documentation archive accepted their
    /// append.
    Saved,
    /// At least one append failed; the generation is not (fully) recorded.
    Unsaved {
        /// Short caller-safe description of what was not recorded.
        detail: String,
    },
}

/// Result of an accepted generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Documentation text exactly as the backend returned it.
    pub documentation: String,
    /// Whether the event was durably recorded.
    pub bookkeeping: BookkeepingStatus,
}

impl GenerationOutcome {
    /// True when both bookkeeping appends succeeded.
    pub fn is_saved(&self) -> bool {
        matches!(self.bookkeeping, BookkeepingStatus::Saved)
    }
}

/// Driving port sequencing one backend call with its bookkeeping writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationCommand: Send + Sync {
    /// Generate documentation for the caller's snippet and record the event.
    async fn generate(
        &self,
        user_id: UserId,
        request: GenerationRequest,
        project_id: Option<Uuid>,
    ) -> Result<GenerationOutcome, Error>;
}

/// Fixture implementation for wiring tests and doctests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGenerationCommand;

#[async_trait]
impl GenerationCommand for FixtureGenerationCommand {
    async fn generate(
        &self,
        _user_id: UserId,
        _request: GenerationRequest,
        _project_id: Option<Uuid>,
    ) -> Result<GenerationOutcome, Error> {
        Ok(GenerationOutcome {
            documentation: "Fixture documentation.".to_owned(),
            bookkeeping: BookkeepingStatus::Saved,
        })
    }
}
