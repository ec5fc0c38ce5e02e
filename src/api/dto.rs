//! Request and response bodies.

use crate::task::{
    domain::{Comment, CommentId, Project, ProjectId, Task, TaskId, TaskType},
    services::TaskDraft,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of task create and update requests.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskPayload {
    /// Task name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Task type.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Owner subject.
    pub owner: String,
    /// Target project.
    pub project: ProjectId,
}

impl From<TaskPayload> for TaskDraft {
    fn from(payload: TaskPayload) -> Self {
        let mut draft = Self::new(
            payload.name,
            payload.task_type,
            payload.owner,
            payload.project,
        );
        if let Some(description) = payload.description {
            draft = draft.with_description(description);
        }
        draft
    }
}

/// Query string of the task listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskQuery {
    /// Restricts the listing to tasks owned by this subject.
    #[serde(default)]
    pub owner: Option<String>,
}

/// Body of comment create requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    /// Commented task.
    pub task_id: TaskId,
    /// Comment body.
    pub text: String,
}

/// Body of project create requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectPayload {
    /// Project name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Task representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task type.
    #[serde(rename = "type")]
    pub task_type: String,
    /// Owner subject.
    pub owner: String,
    /// Owning project.
    pub project: ProjectId,
    /// Workflow state.
    pub state: String,
    /// Resolution, if recorded.
    pub resolution: Option<String>,
    /// Completion percentage.
    pub progress: u8,
    /// Write version.
    pub version: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        let details = task.details();
        Self {
            id: task.id(),
            name: details.name().to_owned(),
            description: details.description().map(str::to_owned),
            task_type: details.task_type().as_str().to_owned(),
            owner: details.owner().as_str().to_owned(),
            project: details.project(),
            state: task.state().as_str().to_owned(),
            resolution: task.resolution().map(|value| value.as_str().to_owned()),
            progress: task.progress().value(),
            version: task.version(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Comment representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Comment identifier.
    pub id: CommentId,
    /// Commented task.
    pub task_id: TaskId,
    /// Author subject.
    pub author: String,
    /// Comment body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id(),
            task_id: comment.task_id(),
            author: comment.author().as_str().to_owned(),
            text: comment.text().to_owned(),
            created_at: comment.created_at(),
        }
    }
}

/// Project representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owner subject.
    pub owner: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            owner: project.owner().as_str().to_owned(),
            created_at: project.created_at(),
        }
    }
}
