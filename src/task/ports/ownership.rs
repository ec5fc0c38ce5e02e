//! Ownership oracle port.
//!
//! Project ownership and task ownership are different relations: the project
//! owner administers every task in the project, while the task owner is the
//! subject assigned to one task. Callers pick the predicate the operation's
//! access rule names and never substitute one for the other.

use crate::auth::domain::Subject;
use crate::error::ErrorKind;
use crate::task::domain::{ProjectId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ownership lookups.
pub type OwnershipResult<T> = Result<T, OwnershipError>;

/// Answers whether a subject owns a project or a task.
#[async_trait]
pub trait OwnershipOracle: Send + Sync {
    /// Returns `true` iff `subject` is the recorded owner of the project.
    ///
    /// # Errors
    ///
    /// Returns [`OwnershipError::ProjectNotFound`] when the project does not
    /// exist.
    async fn is_project_owner(
        &self,
        project_id: ProjectId,
        subject: &Subject,
    ) -> OwnershipResult<bool>;

    /// Returns `true` iff `subject` is the recorded owner of the task itself.
    ///
    /// # Errors
    ///
    /// Returns [`OwnershipError::TaskNotFound`] when the task does not exist.
    async fn is_task_owner(&self, task_id: TaskId, subject: &Subject) -> OwnershipResult<bool>;
}

/// Errors returned by ownership lookups.
#[derive(Debug, Clone, Error)]
pub enum OwnershipError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The backing store failed.
    #[error("ownership lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl OwnershipError {
    /// Wraps a lookup failure.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }

    /// Returns the client-facing classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ProjectNotFound(_) | Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::Lookup(_) => ErrorKind::Internal,
        }
    }
}
