//! Documentation generation orchestration.
//!
//! The service sequences the one place where an external, non-idempotent
//! call meets persistence: validate (done upstream by construction), invoke
//! the backend exactly once, then append one usage record and one archive
//! record. The two appends are independent, non-transactional operations
//! against separate collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    BookkeepingStatus, DocumentationArchive, DocumentationArchiveError, GenerationBackend,
    GenerationBackendError, GenerationCommand, GenerationOutcome, UsageLedger, UsageLedgerError,
};
use crate::domain::{DocumentationDraft, Error, GenerationRequest, UsageDraft, UserId};

fn map_backend_error(error: &GenerationBackendError) -> Error {
    match error {
        GenerationBackendError::Timeout { .. } => {
            Error::backend_failure("documentation generation timed out")
        }
        GenerationBackendError::Transport { .. } => {
            Error::backend_failure("documentation generation backend is unreachable")
        }
        GenerationBackendError::Status { .. } | GenerationBackendError::Decode { .. } => {
            Error::backend_failure("documentation generation failed")
        }
    }
}

/// Orchestrator implementing [`GenerationCommand`].
///
/// # Failure contract
///
/// - A backend failure produces [`crate::domain::ErrorCode::BackendFailure`]
///   with zero side effects; the call is never retried because a retry risks
///   double billing on the backend.
/// - An append failure after the backend succeeded does **not** fail the
///   request: both appends are still attempted, and the generated text is
///   returned flagged [`BookkeepingStatus::Unsaved`]. The generation has
///   already been paid for; only the bookkeeping is lossy.
/// - The whole sequence runs on a detached task, so a caller disconnect
///   discards the result but never cancels the call or its writes.
#[derive(Clone)]
pub struct GenerationService<B, L, A> {
    backend: Arc<B>,
    ledger: Arc<L>,
    archive: Arc<A>,
    model_id: String,
}

impl<B, L, A> GenerationService<B, L, A> {
    /// Create the orchestrator over its three collaborators.
    ///
    /// `model_id` is recorded verbatim into every archived record so the
    /// history shows which model produced each text.
    pub fn new(
        backend: Arc<B>,
        ledger: Arc<L>,
        archive: Arc<A>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            ledger,
            archive,
            model_id: model_id.into(),
        }
    }
}

async fn run_generation<B, L, A>(
    backend: Arc<B>,
    ledger: Arc<L>,
    archive: Arc<A>,
    model_id: String,
    user_id: UserId,
    request: GenerationRequest,
    project_id: Option<Uuid>,
) -> Result<GenerationOutcome, Error>
where
    B: GenerationBackend,
    L: UsageLedger,
    A: DocumentationArchive,
{
    // Single attempt, no retry: the call is costly and non-idempotent.
    let generated = backend.generate(&request).await.map_err(|error| {
        warn!(error = %error, "generation backend call failed");
        map_backend_error(&error)
    })?;

    let usage_draft = UsageDraft {
        user_id: user_id.clone(),
        language: request.language().as_str().to_owned(),
    };
    let documentation_draft = DocumentationDraft {
        user_id,
        project_id,
        original_code: request.code().as_str().to_owned(),
        generated_documentation: generated.documentation.clone(),
        language: request.language().as_str().to_owned(),
        ai_model: model_id,
    };

    // Both appends are attempted even if the first fails; they are
    // independent logs with no transaction spanning them.
    let ledger_result = ledger.append(usage_draft).await;
    let archive_result = archive.append(documentation_draft).await;

    let mut unsaved = Vec::new();
    if let Err(UsageLedgerError::Unavailable { message }) = ledger_result {
        warn!(error = %message, "usage record was not persisted");
        unsaved.push("usage record");
    }
    if let Err(DocumentationArchiveError::Unavailable { message }) = archive_result {
        warn!(error = %message, "documentation record was not persisted");
        unsaved.push("documentation record");
    }

    let bookkeeping = if unsaved.is_empty() {
        BookkeepingStatus::Saved
    } else {
        BookkeepingStatus::Unsaved {
            detail: format!("{} not saved", unsaved.join(" and ")),
        }
    };

    Ok(GenerationOutcome {
        documentation: generated.documentation,
        bookkeeping,
    })
}

#[async_trait]
impl<B, L, A> GenerationCommand for GenerationService<B, L, A>
where
    B: GenerationBackend + 'static,
    L: UsageLedger + 'static,
    A: DocumentationArchive + 'static,
{
    async fn generate(
        &self,
        user_id: UserId,
        request: GenerationRequest,
        project_id: Option<Uuid>,
    ) -> Result<GenerationOutcome, Error> {
        // Detached on purpose: a caller disconnect drops this future, but it
        // must not cancel an already-billed backend call or orphan the
        // bookkeeping writes mid-flight. The task runs to completion and the
        // result is simply discarded when nobody is left to receive it.
        let task = tokio::spawn(run_generation(
            self.backend.clone(),
            self.ledger.clone(),
            self.archive.clone(),
            self.model_id.clone(),
            user_id,
            request,
            project_id,
        ));

        task.await.map_err(|error| {
            warn!(error = %error, "generation task aborted unexpectedly");
            Error::internal("documentation generation was interrupted")
        })?
    }
}

#[cfg(test)]
#[path = "generation_service_tests.rs"]
mod tests;
