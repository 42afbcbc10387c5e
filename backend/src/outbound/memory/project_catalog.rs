//! In-process project catalog adapter.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ProjectCatalog, ProjectCatalogError};
use crate::domain::{Project, UserId};

/// Project catalog held in process memory.
///
/// The catalog port is read-only; [`MemoryProjectCatalog::insert`] exists so
/// deployments and tests can seed projects created outside this core.
#[derive(Debug, Default)]
pub struct MemoryProjectCatalog {
    rows: RwLock<Vec<(u64, Project)>>,
}

impl MemoryProjectCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one project record.
    pub async fn insert(&self, project: Project) {
        let mut rows = self.rows.write().await;
        let seq = rows.len() as u64;
        rows.push((seq, project));
    }
}

#[async_trait]
impl ProjectCatalog for MemoryProjectCatalog {
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Project>, ProjectCatalogError> {
        let rows = self.rows.read().await;
        let mut matching: Vec<&(u64, Project)> = rows
            .iter()
            .filter(|(_, project)| &project.user_id == user_id)
            .collect();
        matching.sort_by_key(|(seq, project)| std::cmp::Reverse((project.created_at, *seq)));
        Ok(matching
            .into_iter()
            .take(limit)
            .map(|(_, project)| project.clone())
            .collect())
    }
}
