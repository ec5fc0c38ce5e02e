//! Task workflow service: authorization, workflow guards and persistence.
//!
//! Every mutating call follows the same order so that no write happens after a
//! failed check:
//!
//! 1. role check against the decision table
//! 2. input validation
//! 3. entity load (`NotFound`)
//! 4. ownership resolution through the [`OwnershipOracle`]
//! 5. workflow guard (`InvalidState` on a closed task)
//! 6. versioned write

use super::authorization::{AccessDenied, AuthorizationDecider, Operation, OwnershipFacts};
use crate::auth::domain::{Identity, Subject};
use crate::error::ErrorKind;
use crate::task::{
    domain::{
        Comment, CommentId, Progress, ProjectId, Task, TaskDetails, TaskDomainError, TaskId,
        TaskResolution, TaskState, TaskType,
    },
    ports::{
        CommentRepository, CommentRepositoryError, OwnershipError, OwnershipOracle,
        TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Descriptive fields submitted when creating or updating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    name: String,
    description: Option<String>,
    task_type: TaskType,
    owner: String,
    project: ProjectId,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        task_type: TaskType,
        owner: impl Into<String>,
        project: ProjectId,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            task_type,
            owner: owner.into(),
            project,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the target project.
    #[must_use]
    pub const fn project(&self) -> ProjectId {
        self.project
    }

    fn into_details(self) -> Result<TaskDetails, TaskDomainError> {
        let owner = Subject::new(self.owner)?;
        let mut details = TaskDetails::new(self.name, self.task_type, owner, self.project)?;
        if let Some(description) = self.description {
            details = details.with_description(description);
        }
        Ok(details)
    }
}

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// The caller failed the role or ownership check.
    #[error(transparent)]
    Denied(#[from] AccessDenied),

    /// Input validation or a workflow guard failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task storage failed or rejected a stale write.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Comment storage failed.
    #[error(transparent)]
    Comments(#[from] CommentRepositoryError),

    /// Ownership could not be resolved.
    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The comment does not exist.
    #[error("comment not found: {0}")]
    CommentNotFound(CommentId),
}

impl TaskWorkflowError {
    /// Returns the client-facing classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Denied(err) => err.kind(),
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::Comments(err) => err.kind(),
            Self::Ownership(err) => err.kind(),
            Self::TaskNotFound(_) | Self::CommentNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for task workflow operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Orchestrates task and comment operations behind the decision table.
pub struct TaskWorkflowService<T, M, O, C>
where
    T: TaskRepository + ?Sized,
    M: CommentRepository + ?Sized,
    O: OwnershipOracle + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    comments: Arc<M>,
    ownership: Arc<O>,
    clock: Arc<C>,
}

impl<T, M, O, C> Clone for TaskWorkflowService<T, M, O, C>
where
    T: TaskRepository + ?Sized,
    M: CommentRepository + ?Sized,
    O: OwnershipOracle + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            comments: Arc::clone(&self.comments),
            ownership: Arc::clone(&self.ownership),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, M, O, C> TaskWorkflowService<T, M, O, C>
where
    T: TaskRepository + ?Sized,
    M: CommentRepository + ?Sized,
    O: OwnershipOracle + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task workflow service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, comments: Arc<M>, ownership: Arc<O>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            comments,
            ownership,
            clock,
        }
    }

    /// Lists tasks, restricted to `owner` when a non-blank owner is given.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, owner: Option<&str>) -> TaskWorkflowResult<Vec<Task>> {
        let Some(value) = owner.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(self.tasks.find_all().await?);
        };
        let subject = Subject::new(value).map_err(TaskDomainError::from)?;
        Ok(self.tasks.find_by_owner(&subject).await?)
    }

    /// Returns one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn find_task(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.load_task(id).await
    }

    /// Creates an open task in the draft's project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Denied`] unless the caller is an admin
    /// owning the target project, [`TaskWorkflowError::Domain`] for invalid
    /// fields and [`TaskWorkflowError::Ownership`] when the project does not
    /// exist.
    pub async fn create_task(
        &self,
        caller: &Identity,
        draft: TaskDraft,
    ) -> TaskWorkflowResult<Task> {
        let operation = Operation::CreateTask;
        Self::require_role(operation, caller)?;
        let details = draft.into_details()?;
        self.authorize_ownership(operation, caller, None, &[details.project()])
            .await?;

        let task = Task::new(details, &*self.clock);
        self.tasks.store(&task).await?;
        info!(
            task_id = %task.id(),
            project_id = %task.project(),
            subject = %caller.subject(),
            "task created"
        );
        Ok(task)
    }

    /// Replaces the descriptive fields of a task.
    ///
    /// Moving a task to another project requires owning both projects.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Denied`] on a failed role or ownership
    /// check, [`TaskWorkflowError::TaskNotFound`] when the task does not exist
    /// and [`TaskDomainError::TaskClosed`] when it is closed.
    pub async fn update_task(
        &self,
        caller: &Identity,
        id: TaskId,
        draft: TaskDraft,
    ) -> TaskWorkflowResult<Task> {
        let operation = Operation::UpdateTask;
        Self::require_role(operation, caller)?;
        let details = draft.into_details()?;
        let mut task = self.load_task(id).await?;

        let mut projects = vec![details.project()];
        if task.project() != details.project() {
            projects.push(task.project());
        }
        self.authorize_ownership(operation, caller, None, &projects)
            .await?;

        task.update_details(details, &*self.clock)?;
        let updated = self.tasks.update(&task).await?;
        info!(task_id = %id, subject = %caller.subject(), "task updated");
        Ok(updated)
    }

    /// Deletes a task together with its comments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Denied`] unless the caller is an admin
    /// owning the task's project and [`TaskWorkflowError::TaskNotFound`] when
    /// the task does not exist.
    pub async fn remove_task(&self, caller: &Identity, id: TaskId) -> TaskWorkflowResult<()> {
        let operation = Operation::DeleteTask;
        Self::require_role(operation, caller)?;
        let task = self.load_task(id).await?;
        self.authorize_ownership(operation, caller, None, &[task.project()])
            .await?;

        let comments = self.comments.remove_by_task(id).await?;
        self.tasks.remove(id).await?;
        info!(task_id = %id, comments, subject = %caller.subject(), "task removed");
        Ok(())
    }

    /// Moves a task to `state`. Any state may follow any other.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Denied`] unless the caller is an admin
    /// owning the task's project and [`TaskWorkflowError::TaskNotFound`] when
    /// the task does not exist.
    pub async fn change_state(
        &self,
        caller: &Identity,
        id: TaskId,
        state: TaskState,
    ) -> TaskWorkflowResult<Task> {
        let operation = Operation::ChangeTaskState;
        Self::require_role(operation, caller)?;
        let mut task = self.load_task(id).await?;
        self.authorize_ownership(operation, caller, None, &[task.project()])
            .await?;

        let previous = task.state();
        task.change_state(state, &*self.clock);
        let updated = self.tasks.update(&task).await?;
        info!(task_id = %id, from = %previous, to = %state, "task state changed");
        Ok(updated)
    }

    /// Records a resolution on an open or in-progress task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Denied`] unless the caller owns the task
    /// and [`TaskDomainError::TaskClosed`] when the task is closed.
    pub async fn change_resolution(
        &self,
        caller: &Identity,
        id: TaskId,
        resolution: TaskResolution,
    ) -> TaskWorkflowResult<Task> {
        let operation = Operation::ChangeTaskResolution;
        Self::require_role(operation, caller)?;
        let mut task = self.load_task(id).await?;
        self.authorize_ownership(operation, caller, Some(id), &[task.project()])
            .await?;

        task.change_resolution(resolution, &*self.clock)?;
        let updated = self.tasks.update(&task).await?;
        info!(task_id = %id, %resolution, "task resolution changed");
        Ok(updated)
    }

    /// Records progress on an open or in-progress task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ProgressOutOfRange`] for values outside
    /// `0..=100`, [`TaskWorkflowError::Denied`] unless the caller owns the
    /// task or its project and [`TaskDomainError::TaskClosed`] when the task
    /// is closed.
    pub async fn change_progress(
        &self,
        caller: &Identity,
        id: TaskId,
        value: i64,
    ) -> TaskWorkflowResult<Task> {
        let operation = Operation::ChangeTaskProgress;
        Self::require_role(operation, caller)?;
        let progress = Progress::new(value)?;
        let mut task = self.load_task(id).await?;
        self.authorize_ownership(operation, caller, Some(id), &[task.project()])
            .await?;

        task.change_progress(progress, &*self.clock)?;
        let updated = self.tasks.update(&task).await?;
        info!(task_id = %id, %progress, "task progress changed");
        Ok(updated)
    }

    /// Adds a comment to a task that is not closed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCommentText`] for blank text,
    /// [`TaskWorkflowError::TaskNotFound`] when the task does not exist and
    /// [`TaskDomainError::TaskClosed`] when it is closed.
    pub async fn add_comment(
        &self,
        caller: &Identity,
        task_id: TaskId,
        text: impl Into<String>,
    ) -> TaskWorkflowResult<Comment> {
        Self::require_role(Operation::CreateComment, caller)?;
        let comment = Comment::new(task_id, caller.subject().clone(), text, &*self.clock)?;
        let task = self.load_task(task_id).await?;
        task.ensure_open()?;

        self.comments.store(&comment).await?;
        info!(
            comment_id = %comment.id(),
            %task_id,
            subject = %caller.subject(),
            "comment added"
        );
        Ok(comment)
    }

    /// Returns one comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::CommentNotFound`] when the comment does not
    /// exist.
    pub async fn find_comment(&self, id: CommentId) -> TaskWorkflowResult<Comment> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::CommentNotFound(id))
    }

    async fn load_task(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::TaskNotFound(id))
    }

    fn require_role(operation: Operation, caller: &Identity) -> TaskWorkflowResult<()> {
        AuthorizationDecider::check_role(operation, Some(caller)).inspect_err(|err| {
            warn!(%operation, subject = %caller.subject(), role = %caller.role(), "{err}");
        })?;
        Ok(())
    }

    /// Resolves the ownership facts the operation's rule needs and checks
    /// them. `projects` must all be owned for the project relation to hold.
    async fn authorize_ownership(
        &self,
        operation: Operation,
        caller: &Identity,
        task: Option<TaskId>,
        projects: &[ProjectId],
    ) -> TaskWorkflowResult<()> {
        let requirement = operation.rule().ownership();
        let subject = caller.subject();
        let mut facts = OwnershipFacts::NONE;

        if let Some(task_id) = task.filter(|_| requirement.needs_task_owner()) {
            facts.task_owner = self.ownership.is_task_owner(task_id, subject).await?;
        }

        if requirement.needs_project_owner() && !requirement.is_met(facts) {
            let mut owns_all = !projects.is_empty();
            for project_id in projects {
                if !self.ownership.is_project_owner(*project_id, subject).await? {
                    owns_all = false;
                    break;
                }
            }
            facts.project_owner = owns_all;
        }

        AuthorizationDecider::check_ownership(operation, facts).inspect_err(|err| {
            warn!(%operation, %subject, "{err}");
        })?;
        Ok(())
    }
}
