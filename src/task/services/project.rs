//! Service layer for project creation and retrieval.

use super::authorization::{AccessDenied, AuthorizationDecider, Operation};
use crate::auth::domain::Identity;
use crate::error::ErrorKind;
use crate::task::{
    domain::{Project, ProjectId, TaskDomainError},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// The caller lacks the required role.
    #[error(transparent)]
    Denied(#[from] AccessDenied),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),

    /// The project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),
}

impl ProjectServiceError {
    /// Returns the client-facing classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Denied(err) => err.kind(),
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service. The creating admin becomes the owner.
pub struct ProjectService<P, C>
where
    P: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> Clone for ProjectService<P, C>
where
    P: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P, C> ProjectService<P, C>
where
    P: ProjectRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<P>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a project owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Denied`] unless the caller is an admin
    /// and [`ProjectServiceError::Domain`] when the name is blank.
    pub async fn create(
        &self,
        caller: &Identity,
        name: impl Into<String>,
        description: Option<String>,
    ) -> ProjectServiceResult<Project> {
        AuthorizationDecider::check_role(Operation::CreateProject, Some(caller)).inspect_err(
            |err| warn!(subject = %caller.subject(), role = %caller.role(), "{err}"),
        )?;

        let project = Project::new(name, description, caller.subject().clone(), &*self.clock)?;
        self.repository.store(&project).await?;
        info!(project_id = %project.id(), owner = %project.owner(), "project created");
        Ok(project)
    }

    /// Returns one project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist.
    pub async fn find(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))
    }

    /// Returns every project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when the lookup fails.
    pub async fn list(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repository.find_all().await?)
    }
}
