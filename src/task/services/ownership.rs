//! Ownership oracle backed by the project and task repositories.

use crate::auth::domain::Subject;
use crate::task::{
    domain::{ProjectId, TaskId},
    ports::{OwnershipError, OwnershipOracle, OwnershipResult, ProjectRepository, TaskRepository},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Resolves ownership by reading the owner recorded on each entity.
pub struct RepositoryOwnershipOracle<P, T>
where
    P: ProjectRepository + ?Sized,
    T: TaskRepository + ?Sized,
{
    projects: Arc<P>,
    tasks: Arc<T>,
}

impl<P, T> Clone for RepositoryOwnershipOracle<P, T>
where
    P: ProjectRepository + ?Sized,
    T: TaskRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            tasks: Arc::clone(&self.tasks),
        }
    }
}

impl<P, T> RepositoryOwnershipOracle<P, T>
where
    P: ProjectRepository + ?Sized,
    T: TaskRepository + ?Sized,
{
    /// Creates an oracle over the given repositories.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>) -> Self {
        Self { projects, tasks }
    }
}

#[async_trait]
impl<P, T> OwnershipOracle for RepositoryOwnershipOracle<P, T>
where
    P: ProjectRepository + ?Sized,
    T: TaskRepository + ?Sized,
{
    async fn is_project_owner(
        &self,
        project_id: ProjectId,
        subject: &Subject,
    ) -> OwnershipResult<bool> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(OwnershipError::lookup)?
            .ok_or(OwnershipError::ProjectNotFound(project_id))?;
        let owned = project.is_owned_by(subject);
        debug!(%project_id, %subject, owned, "resolved project ownership");
        Ok(owned)
    }

    async fn is_task_owner(&self, task_id: TaskId, subject: &Subject) -> OwnershipResult<bool> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await
            .map_err(OwnershipError::lookup)?
            .ok_or(OwnershipError::TaskNotFound(task_id))?;
        let owned = task.owner() == subject;
        debug!(%task_id, %subject, owned, "resolved task ownership");
        Ok(owned)
    }
}
