//! In-process documentation archive adapter.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{DocumentationArchive, DocumentationArchiveError};
use crate::domain::{DocumentationDraft, DocumentationRecord, UserId};

/// Append-only documentation archive held in process memory.
///
/// Same ordering contract as the ledger adapter: newest first, timestamp
/// ties broken by insertion order (later append first).
#[derive(Debug, Default)]
pub struct MemoryDocumentationArchive {
    rows: RwLock<Vec<(u64, DocumentationRecord)>>,
}

impl MemoryDocumentationArchive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_newest_first(
        rows: &[(u64, DocumentationRecord)],
        filter: impl Fn(&DocumentationRecord) -> bool,
    ) -> Vec<DocumentationRecord> {
        let mut matching: Vec<&(u64, DocumentationRecord)> =
            rows.iter().filter(|(_, record)| filter(record)).collect();
        matching.sort_by_key(|(seq, record)| std::cmp::Reverse((record.created_at, *seq)));
        matching
            .into_iter()
            .map(|(_, record)| record.clone())
            .collect()
    }
}

#[async_trait]
impl DocumentationArchive for MemoryDocumentationArchive {
    async fn append(
        &self,
        draft: DocumentationDraft,
    ) -> Result<DocumentationRecord, DocumentationArchiveError> {
        let mut rows = self.rows.write().await;
        let record = DocumentationRecord {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            project_id: draft.project_id,
            original_code: draft.original_code,
            generated_documentation: draft.generated_documentation,
            language: draft.language,
            ai_model: draft.ai_model,
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
    ) -> Result<Vec<DocumentationRecord>, DocumentationArchiveError> {
        let rows = self.rows.read().await;
        let mut records =
            Self::sorted_newest_first(&rows, |record| &record.user_id == user_id);
        records.truncate(limit);
        Ok(records)
    }

    async fn query_by_project(
        &self,
        project_id: &Uuid,
    ) -> Result<Vec<DocumentationRecord>, DocumentationArchiveError> {
        let rows = self.rows.read().await;
        // Unbounded on purpose: this query backs the live per-project count.
        Ok(Self::sorted_newest_first(&rows, |record| {
            record.project_id.as_ref() == Some(project_id)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(user_id: &UserId, project_id: Option<Uuid>, code: &str) -> DocumentationDraft {
        DocumentationDraft {
            user_id: user_id.clone(),
            project_id,
            original_code: code.to_owned(),
            generated_documentation: format!("docs for {code}"),
            language: "python".to_owned(),
            ai_model: "gpt-4".to_owned(),
        }
    }

    #[tokio::test]
    async fn user_query_is_newest_first_and_limited() {
        let archive = MemoryDocumentationArchive::new();
        let user_id = UserId::random();
        for code in ["a", "b", "c"] {
            archive
                .append(draft(&user_id, None, code))
                .await
                .expect("append succeeds");
        }

        let records = archive
            .query_by_user(&user_id, 2)
            .await
            .expect("query succeeds");
        let codes: Vec<&str> = records.iter().map(|r| r.original_code.as_str()).collect();
        assert_eq!(codes, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn project_query_is_unbounded_and_scoped() {
        let archive = MemoryDocumentationArchive::new();
        let user_id = UserId::random();
        let project_id = Uuid::new_v4();

        for index in 0..15 {
            archive
                .append(draft(&user_id, Some(project_id), &format!("p{index}")))
                .await
                .expect("append succeeds");
        }
        archive
            .append(draft(&user_id, None, "unlinked"))
            .await
            .expect("append succeeds");
        archive
            .append(draft(&user_id, Some(Uuid::new_v4()), "other-project"))
            .await
            .expect("append succeeds");

        let records = archive
            .query_by_project(&project_id)
            .await
            .expect("query succeeds");
        assert_eq!(records.len(), 15);
        assert!(
            records
                .iter()
                .all(|record| record.project_id == Some(project_id))
        );
    }

    #[tokio::test]
    async fn appended_records_carry_the_draft_content() {
        let archive = MemoryDocumentationArchive::new();
        let user_id = UserId::random();
        let record = archive
            .append(draft(&user_id, None, "print(1)"))
            .await
            .expect("append succeeds");

        assert_eq!(record.original_code, "print(1)");
        assert_eq!(record.generated_documentation, "docs for print(1)");
        assert_eq!(record.ai_model, "gpt-4");
    }

    #[tokio::test]
    async fn requerying_without_writes_is_idempotent() {
        let archive = MemoryDocumentationArchive::new();
        let user_id = UserId::random();
        for code in ["a", "b"] {
            archive
                .append(draft(&user_id, None, code))
                .await
                .expect("append succeeds");
        }

        let first = archive
            .query_by_user(&user_id, 10)
            .await
            .expect("query succeeds");
        let second = archive
            .query_by_user(&user_id, 10)
            .await
            .expect("query succeeds");
        assert_eq!(first, second);
    }
}
