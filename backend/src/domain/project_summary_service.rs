//! Per-project dashboard summaries with derived documentation counts.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::warn;

use crate::domain::ports::{
    DocumentationArchive, ProjectCatalog, ProjectCatalogError, ProjectSummariesQuery,
    ProjectSummary,
};
use crate::domain::{Error, Project, UserId};

/// Maximum number of projects listed on the dashboard.
pub const PROJECT_LIST_LIMIT: usize = 10;

fn map_catalog_error(error: ProjectCatalogError) -> Error {
    match error {
        ProjectCatalogError::Unavailable { message } => {
            Error::service_unavailable(format!("project catalog unavailable: {message}"))
        }
    }
}

/// Service implementing [`ProjectSummariesQuery`].
///
/// The per-project count queries are independent of each other, so they fan
/// out concurrently and join; the joined results are zipped back onto the
/// catalog ordering, so completion order never affects output order. One
/// failed count degrades that single entry to an unknown count instead of
/// failing the whole listing.
#[derive(Clone)]
pub struct ProjectSummaryService<C, A> {
    catalog: Arc<C>,
    archive: Arc<A>,
}

impl<C, A> ProjectSummaryService<C, A> {
    /// Create the summary builder over the catalog and archive.
    pub fn new(catalog: Arc<C>, archive: Arc<A>) -> Self {
        Self { catalog, archive }
    }
}

impl<C, A> ProjectSummaryService<C, A>
where
    A: DocumentationArchive,
{
    /// Count archive records for one project; `None` when the query fails.
    ///
    /// The count is intentionally unbounded, unlike the windowed usage
    /// statistics: the dashboard promises the live count.
    async fn docs_count(&self, project: &Project) -> Option<u64> {
        match self.archive.query_by_project(&project.id).await {
            Ok(records) => Some(records.len() as u64),
            Err(error) => {
                warn!(
                    project_id = %project.id,
                    error = %error,
                    "documentation count unavailable for project"
                );
                None
            }
        }
    }
}

#[async_trait]
impl<C, A> ProjectSummariesQuery for ProjectSummaryService<C, A>
where
    C: ProjectCatalog,
    A: DocumentationArchive,
{
    async fn summaries_for(&self, user_id: &UserId) -> Result<Vec<ProjectSummary>, Error> {
        let projects = self
            .catalog
            .list_for_user(user_id, PROJECT_LIST_LIMIT)
            .await
            .map_err(map_catalog_error)?;

        let counts = join_all(projects.iter().map(|project| self.docs_count(project))).await;

        Ok(projects
            .into_iter()
            .zip(counts)
            .map(|(project, docs_count)| ProjectSummary {
                id: project.id,
                name: project.name,
                description: project.description,
                created_at: project.created_at,
                docs_count,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "project_summary_service_tests.rs"]
mod tests;
