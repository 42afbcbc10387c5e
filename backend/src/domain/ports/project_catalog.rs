//! Port for reading user-owned projects.
//!
//! Project creation and mutation happen outside this core; the catalog is a
//! read-only collaborator here.

use async_trait::async_trait;

use crate::domain::{Project, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project catalog adapters.
    pub enum ProjectCatalogError {
        /// The catalog store could not be reached.
        Unavailable { message: String } =>
            "project catalog unavailable: {message}",
    }
}

/// Port for listing a user's projects, newest first, truncated to `limit`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    /// List the caller's most recently created projects.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Project>, ProjectCatalogError>;
}

/// Fixture implementation for wiring tests and doctests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectCatalog;

#[async_trait]
impl ProjectCatalog for FixtureProjectCatalog {
    async fn list_for_user(
        &self,
        _user_id: &UserId,
        _limit: usize,
    ) -> Result<Vec<Project>, ProjectCatalogError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_catalog_reports_no_projects() {
        let catalog = FixtureProjectCatalog;
        let projects = catalog
            .list_for_user(&UserId::random(), 10)
            .await
            .expect("fixture query succeeds");
        assert!(projects.is_empty());
    }
}
