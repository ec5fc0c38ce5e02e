//! Repository port for comment persistence.

use crate::error::ErrorKind;
use crate::task::domain::{Comment, CommentId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Comment persistence contract. Comments are immutable and are removed only
/// together with their task.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::DuplicateComment`] when the comment ID
    /// already exists.
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Finds a comment by identifier.
    ///
    /// Returns `None` when the comment does not exist.
    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>>;

    /// Returns the comments on a task, oldest first.
    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>>;

    /// Removes every comment on a task and returns how many were removed.
    async fn remove_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the client-facing classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateComment(_) => ErrorKind::Conflict,
            Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}
