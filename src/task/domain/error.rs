//! Error types for task domain validation and parsing.

use super::TaskId;
use crate::{auth::domain::AuthDomainError, error::ErrorKind};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyCommentText,

    /// The progress value lies outside `0..=100`.
    #[error("progress {0} is out of range, expected 0..=100")]
    ProgressOutOfRange(i64),

    /// An owner or author subject failed validation.
    #[error(transparent)]
    Subject(#[from] AuthDomainError),

    /// The task is closed and the requested change is blocked until it is
    /// reopened.
    #[error("task {0} is closed")]
    TaskClosed(TaskId),
}

impl TaskDomainError {
    /// Returns the client-facing classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskClosed(_) => ErrorKind::InvalidState,
            Self::EmptyTaskName
            | Self::EmptyProjectName
            | Self::EmptyCommentText
            | Self::ProgressOutOfRange(_)
            | Self::Subject(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Error returned while parsing task states.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);

/// Error returned while parsing task resolutions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task resolution: {0}")]
pub struct ParseTaskResolutionError(pub String);

/// Error returned while parsing task types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task type: {0}")]
pub struct ParseTaskTypeError(pub String);
