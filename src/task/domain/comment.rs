//! Immutable comments attached to tasks.

use super::{CommentId, TaskDomainError, TaskId};
use crate::auth::domain::Subject;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Comment written by an authenticated subject on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author: Subject,
    text: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Task the comment belongs to.
    pub task_id: TaskId,
    /// Persisted author subject.
    pub author: Subject,
    /// Persisted comment body.
    pub text: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment on `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCommentText`] when the text is blank.
    pub fn new(
        task_id: TaskId,
        author: Subject,
        text: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw_text = text.into();
        if raw_text.trim().is_empty() {
            return Err(TaskDomainError::EmptyCommentText);
        }
        Ok(Self {
            id: CommentId::new(),
            task_id,
            author,
            text: raw_text,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author: data.author,
            text: data.text,
            created_at: data.created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the commented task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> &Subject {
        &self.author
    }

    /// Returns the comment body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
