//! Domain model for tasks, projects and comments.
//!
//! The task domain models the workflow state machine and the ownership facts
//! authorization relies on, while keeping infrastructure concerns outside the
//! domain boundary.

mod comment;
mod error;
mod ids;
mod project;
mod task;

pub use comment::{Comment, PersistedCommentData};
pub use error::{
    ParseTaskResolutionError, ParseTaskStateError, ParseTaskTypeError, TaskDomainError,
};
pub use ids::{CommentId, Progress, ProjectId, TaskId};
pub use project::{PersistedProjectData, Project};
pub use task::{PersistedTaskData, Task, TaskDetails, TaskResolution, TaskState, TaskType};
