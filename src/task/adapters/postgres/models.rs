//! Diesel row models for task, project and comment persistence.

use super::schema::{comments, projects, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task type.
    pub task_type: String,
    /// Owner subject.
    pub owner: String,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Workflow state.
    pub state: String,
    /// Optional resolution.
    pub resolution: Option<String>,
    /// Completion percentage.
    pub progress: i16,
    /// Optimistic write version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task type.
    pub task_type: String,
    /// Owner subject.
    pub owner: String,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Workflow state.
    pub state: String,
    /// Optional resolution.
    pub resolution: Option<String>,
    /// Completion percentage.
    pub progress: i16,
    /// Optimistic write version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable task columns written by a versioned update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task type.
    pub task_type: String,
    /// Owner subject.
    pub owner: String,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Workflow state.
    pub state: String,
    /// Optional resolution.
    pub resolution: Option<String>,
    /// Completion percentage.
    pub progress: i16,
    /// Version assigned by this write.
    pub version: i64,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owner subject.
    pub owner: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owner subject.
    pub owner: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for comment records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Commented task.
    pub task_id: uuid::Uuid,
    /// Author subject.
    pub author: String,
    /// Comment body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Commented task.
    pub task_id: uuid::Uuid,
    /// Author subject.
    pub author: String,
    /// Comment body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
