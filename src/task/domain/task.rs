//! Task aggregate root and the workflow state machine.
//!
//! A task moves along three independent axes: [`TaskState`], an optional
//! [`TaskResolution`], and [`Progress`]. State changes are always accepted;
//! resolution, progress and detail changes are blocked while the task is
//! [`TaskState::Closed`].

use super::{
    ParseTaskResolutionError, ParseTaskStateError, ParseTaskTypeError, Progress, ProjectId,
    TaskDomainError, TaskId,
};
use crate::auth::domain::Subject;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Task has been created and nobody is working on it yet.
    Open,
    /// Task is being worked on.
    InProgress,
    /// Task is finished; resolution and progress are frozen until reopened.
    Closed,
}

impl TaskState {
    /// Returns the canonical wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Closed => "CLOSED",
        }
    }

    /// Returns `true` when the state blocks resolution, progress and detail
    /// changes.
    #[must_use]
    pub const fn blocks_mutation(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome recorded against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskResolution {
    /// The work was done.
    #[serde(rename = "FIXED")]
    Fixed,
    /// The work will not be done.
    #[serde(rename = "WONTFIX", alias = "WONT_FIX")]
    WontFix,
    /// Another task covers the same work.
    #[serde(rename = "DUPLICATE")]
    Duplicate,
    /// Not enough information to act on the task.
    #[serde(rename = "INCOMPLETE")]
    Incomplete,
    /// The reported problem could not be reproduced.
    #[serde(rename = "CANNOT_REPRODUCE")]
    CannotReproduce,
}

impl TaskResolution {
    /// Returns the canonical wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "FIXED",
            Self::WontFix => "WONTFIX",
            Self::Duplicate => "DUPLICATE",
            Self::Incomplete => "INCOMPLETE",
            Self::CannotReproduce => "CANNOT_REPRODUCE",
        }
    }
}

impl TryFrom<&str> for TaskResolution {
    type Error = ParseTaskResolutionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "FIXED" => Ok(Self::Fixed),
            "WONTFIX" | "WONT_FIX" => Ok(Self::WontFix),
            "DUPLICATE" => Ok(Self::Duplicate),
            "INCOMPLETE" => Ok(Self::Incomplete),
            "CANNOT_REPRODUCE" => Ok(Self::CannotReproduce),
            _ => Err(ParseTaskResolutionError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of work a task describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// Defect in existing behaviour.
    Bug,
    /// New capability.
    Feature,
    /// Enhancement to an existing capability.
    Improvement,
    /// Operational or support request.
    Support,
}

impl TaskType {
    /// Returns the canonical wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "BUG",
            Self::Feature => "FEATURE",
            Self::Improvement => "IMPROVEMENT",
            Self::Support => "SUPPORT",
        }
    }
}

impl TryFrom<&str> for TaskType {
    type Error = ParseTaskTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "BUG" => Ok(Self::Bug),
            "FEATURE" => Ok(Self::Feature),
            "IMPROVEMENT" => Ok(Self::Improvement),
            "SUPPORT" => Ok(Self::Support),
            _ => Err(ParseTaskTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable descriptive fields of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    name: String,
    description: Option<String>,
    task_type: TaskType,
    owner: Subject,
    project: ProjectId,
}

impl TaskDetails {
    /// Creates validated task details.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        task_type: TaskType,
        owner: Subject,
        project: ProjectId,
    ) -> Result<Self, TaskDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            description: None,
            task_type,
            owner,
            project,
        })
    }

    /// Sets the description; blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let raw = description.into();
        let trimmed = raw.trim();
        self.description = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the task owner.
    #[must_use]
    pub const fn owner(&self) -> &Subject {
        &self.owner
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    #[serde(flatten)]
    details: TaskDetails,
    state: TaskState,
    resolution: Option<TaskResolution>,
    progress: Progress,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted descriptive fields.
    pub details: TaskDetails,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted resolution, if any.
    pub resolution: Option<TaskResolution>,
    /// Persisted progress.
    pub progress: Progress,
    /// Persisted write version.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an open task with no resolution and zero progress.
    #[must_use]
    pub fn new(details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            details,
            state: TaskState::Open,
            resolution: None,
            progress: Progress::ZERO,
            version: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            details: data.details,
            state: data.state,
            resolution: data.resolution,
            progress: data.progress,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the task owner.
    #[must_use]
    pub const fn owner(&self) -> &Subject {
        self.details.owner()
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.details.project()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the resolution, if one has been recorded.
    #[must_use]
    pub const fn resolution(&self) -> Option<TaskResolution> {
        self.resolution
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the version this copy was read at.
    ///
    /// Storage compares it on write so concurrent changes to the same task
    /// cannot silently overwrite each other.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the task is closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.state.blocks_mutation()
    }

    /// Moves the task to `state`.
    ///
    /// Any state may follow any other, including itself; this is the only way
    /// out of [`TaskState::Closed`].
    pub fn change_state(&mut self, state: TaskState, clock: &impl Clock) {
        self.state = state;
        self.touch(clock);
    }

    /// Records a resolution.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskClosed`] when the task is closed.
    pub fn change_resolution(
        &mut self,
        resolution: TaskResolution,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_open()?;
        self.resolution = Some(resolution);
        self.touch(clock);
        Ok(())
    }

    /// Records progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskClosed`] when the task is closed.
    pub fn change_progress(
        &mut self,
        progress: Progress,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_open()?;
        self.progress = progress;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskClosed`] when the task is closed.
    pub fn update_details(
        &mut self,
        details: TaskDetails,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_open()?;
        self.details = details;
        self.touch(clock);
        Ok(())
    }

    /// Returns a copy stamped with the version storage assigned on write.
    #[must_use]
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Fails when the task is closed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskClosed`] when the task is closed.
    pub fn ensure_open(&self) -> Result<(), TaskDomainError> {
        if self.is_closed() {
            return Err(TaskDomainError::TaskClosed(self.id));
        }
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
