//! Tests for the project summary builder.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    DocumentationArchiveError, MockProjectCatalog,
};
use crate::domain::{DocumentationDraft, DocumentationRecord};

fn project(user_id: &UserId, name: &str) -> Project {
    let now = Utc::now();
    Project {
        id: Uuid::new_v4(),
        user_id: user_id.clone(),
        name: name.to_owned(),
        description: None,
        created_at: now,
        updated_at: now,
    }
}

fn dummy_record(user_id: &UserId, project_id: Uuid) -> DocumentationRecord {
    DocumentationRecord {
        id: Uuid::new_v4(),
        user_id: user_id.clone(),
        project_id: Some(project_id),
        original_code: "print(1)".to_owned(),
        generated_documentation: "Prints 1".to_owned(),
        language: "python".to_owned(),
        ai_model: "gpt-4".to_owned(),
        created_at: Utc::now(),
    }
}

/// Archive double with per-project counts, injected delays, and failures.
///
/// Mock expectations cannot await, so count-ordering behaviour is exercised
/// with this hand-rolled double instead of `MockDocumentationArchive`.
#[derive(Default)]
struct ScriptedArchive {
    owner: Option<UserId>,
    counts: HashMap<Uuid, usize>,
    delays: HashMap<Uuid, Duration>,
    failing: HashSet<Uuid>,
}

impl ScriptedArchive {
    fn with_owner(user_id: &UserId) -> Self {
        Self {
            owner: Some(user_id.clone()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl DocumentationArchive for ScriptedArchive {
    async fn append(
        &self,
        _draft: DocumentationDraft,
    ) -> Result<DocumentationRecord, DocumentationArchiveError> {
        Err(DocumentationArchiveError::unavailable(
            "append is not scripted",
        ))
    }

    async fn query_by_user(
        &self,
        _user_id: &UserId,
        _limit: usize,
    ) -> Result<Vec<DocumentationRecord>, DocumentationArchiveError> {
        Ok(Vec::new())
    }

    async fn query_by_project(
        &self,
        project_id: &Uuid,
    ) -> Result<Vec<DocumentationRecord>, DocumentationArchiveError> {
        if let Some(delay) = self.delays.get(project_id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(project_id) {
            return Err(DocumentationArchiveError::unavailable("store offline"));
        }
        let owner = self
            .owner
            .clone()
            .ok_or_else(|| DocumentationArchiveError::unavailable("no scripted owner"))?;
        let count = self.counts.get(project_id).copied().unwrap_or(0);
        Ok((0..count).map(|_| dummy_record(&owner, *project_id)).collect())
    }
}

#[tokio::test]
async fn summaries_follow_catalog_order_despite_count_completion_order() {
    let user_id = UserId::random();
    let projects = vec![
        project(&user_id, "first"),
        project(&user_id, "second"),
        project(&user_id, "third"),
    ];
    let ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();

    let mut archive = ScriptedArchive::with_owner(&user_id);
    // The first project's count finishes last; order must not change.
    archive.delays.insert(ids[0], Duration::from_millis(40));
    archive.delays.insert(ids[1], Duration::from_millis(5));
    archive.counts.insert(ids[0], 2);
    archive.counts.insert(ids[1], 7);
    archive.counts.insert(ids[2], 0);

    let mut catalog = MockProjectCatalog::new();
    let listed = projects.clone();
    catalog
        .expect_list_for_user()
        .times(1)
        .withf(|_, limit| *limit == PROJECT_LIST_LIMIT)
        .return_once(move |_, _| Ok(listed));

    let service = ProjectSummaryService::new(Arc::new(catalog), Arc::new(archive));
    let summaries = service
        .summaries_for(&user_id)
        .await
        .expect("summaries computed");

    let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert_eq!(summaries[0].docs_count, Some(2));
    assert_eq!(summaries[1].docs_count, Some(7));
    assert_eq!(summaries[2].docs_count, Some(0));
}

#[tokio::test]
async fn one_failing_count_degrades_only_that_entry() {
    let user_id = UserId::random();
    let projects = vec![
        project(&user_id, "healthy"),
        project(&user_id, "degraded"),
    ];
    let ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();

    let mut archive = ScriptedArchive::with_owner(&user_id);
    archive.counts.insert(ids[0], 3);
    archive.failing.insert(ids[1]);

    let mut catalog = MockProjectCatalog::new();
    let listed = projects.clone();
    catalog
        .expect_list_for_user()
        .times(1)
        .return_once(move |_, _| Ok(listed));

    let service = ProjectSummaryService::new(Arc::new(catalog), Arc::new(archive));
    let summaries = service
        .summaries_for(&user_id)
        .await
        .expect("listing survives a degraded count");

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].docs_count, Some(3));
    assert_eq!(summaries[1].docs_count, None);
}

#[tokio::test]
async fn catalog_failure_maps_to_service_unavailable() {
    let mut catalog = MockProjectCatalog::new();
    catalog
        .expect_list_for_user()
        .times(1)
        .return_once(|_, _| Err(ProjectCatalogError::unavailable("connection refused")));

    let service = ProjectSummaryService::new(
        Arc::new(catalog),
        Arc::new(ScriptedArchive::default()),
    );
    let error = service
        .summaries_for(&UserId::random())
        .await
        .expect_err("failure surfaces");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn empty_catalog_yields_empty_listing() {
    let mut catalog = MockProjectCatalog::new();
    catalog
        .expect_list_for_user()
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let service = ProjectSummaryService::new(
        Arc::new(catalog),
        Arc::new(ScriptedArchive::default()),
    );
    let summaries = service
        .summaries_for(&UserId::random())
        .await
        .expect("empty listing");

    assert!(summaries.is_empty());
}
