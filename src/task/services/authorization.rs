//! Role and ownership decision table for every task-management operation.
//!
//! Each [`Operation`] maps to exactly one [`AccessRule`]. The
//! [`AuthorizationDecider`] evaluates a rule against the caller's identity and
//! the ownership facts gathered for the target; it never performs lookups
//! itself.

use crate::auth::domain::{Identity, Role};
use crate::error::ErrorKind;
use std::fmt;
use thiserror::Error;

/// Operation identified by its route, used as the decision table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List tasks, optionally filtered by owner.
    ListTasks,
    /// Read one task.
    GetTask,
    /// Create a task in a project.
    CreateTask,
    /// Replace a task's descriptive fields.
    UpdateTask,
    /// Delete a task.
    DeleteTask,
    /// Move a task to another state.
    ChangeTaskState,
    /// Record a task resolution.
    ChangeTaskResolution,
    /// Record task progress.
    ChangeTaskProgress,
    /// Comment on a task.
    CreateComment,
    /// Read one comment.
    GetComment,
    /// List projects.
    ListProjects,
    /// Read one project.
    GetProject,
    /// Create a project.
    CreateProject,
}

impl Operation {
    /// Every operation in route-table order.
    pub const ALL: [Self; 13] = [
        Self::ListTasks,
        Self::GetTask,
        Self::CreateTask,
        Self::UpdateTask,
        Self::DeleteTask,
        Self::ChangeTaskState,
        Self::ChangeTaskResolution,
        Self::ChangeTaskProgress,
        Self::CreateComment,
        Self::GetComment,
        Self::ListProjects,
        Self::GetProject,
        Self::CreateProject,
    ];

    /// Returns the access rule guarding this operation.
    #[must_use]
    pub const fn rule(self) -> AccessRule {
        use OwnershipRequirement as Own;
        match self {
            Self::ListTasks
            | Self::GetTask
            | Self::GetComment
            | Self::ListProjects
            | Self::GetProject => AccessRule::new(None, Own::None),
            Self::CreateTask | Self::UpdateTask | Self::DeleteTask | Self::ChangeTaskState => {
                AccessRule::new(Some(Role::Admin), Own::ProjectOwner)
            }
            Self::ChangeTaskResolution => AccessRule::new(Some(Role::User), Own::TaskOwner),
            Self::ChangeTaskProgress => {
                AccessRule::new(Some(Role::User), Own::TaskOwnerOrProjectOwner)
            }
            Self::CreateComment => AccessRule::new(Some(Role::User), Own::None),
            Self::CreateProject => AccessRule::new(Some(Role::Admin), Own::None),
        }
    }

    /// Returns the HTTP method of the route serving this operation.
    #[must_use]
    pub const fn method(self) -> RouteMethod {
        match self {
            Self::ListTasks
            | Self::GetTask
            | Self::GetComment
            | Self::ListProjects
            | Self::GetProject => RouteMethod::Get,
            Self::UpdateTask => RouteMethod::Put,
            Self::DeleteTask => RouteMethod::Delete,
            Self::CreateTask
            | Self::ChangeTaskState
            | Self::ChangeTaskResolution
            | Self::ChangeTaskProgress
            | Self::CreateComment
            | Self::CreateProject => RouteMethod::Post,
        }
    }

    /// Returns the path pattern of the route serving this operation.
    #[must_use]
    pub const fn path_pattern(self) -> &'static str {
        match self {
            Self::ListTasks | Self::CreateTask => "/api/tasks",
            Self::GetTask | Self::UpdateTask | Self::DeleteTask => "/api/tasks/:id",
            Self::ChangeTaskState => "/api/tasks/:id/changeState",
            Self::ChangeTaskResolution => "/api/tasks/:id/changeResolution",
            Self::ChangeTaskProgress => "/api/tasks/:id/changeProgress",
            Self::CreateComment => "/api/comments",
            Self::GetComment => "/api/comments/:id",
            Self::ListProjects | Self::CreateProject => "/api/projects",
            Self::GetProject => "/api/projects/:id",
        }
    }

    /// Returns a stable identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListTasks => "list_tasks",
            Self::GetTask => "get_task",
            Self::CreateTask => "create_task",
            Self::UpdateTask => "update_task",
            Self::DeleteTask => "delete_task",
            Self::ChangeTaskState => "change_task_state",
            Self::ChangeTaskResolution => "change_task_resolution",
            Self::ChangeTaskProgress => "change_task_progress",
            Self::CreateComment => "create_comment",
            Self::GetComment => "get_comment",
            Self::ListProjects => "list_projects",
            Self::GetProject => "get_project",
            Self::CreateProject => "create_project",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP method of an operation's route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl RouteMethod {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ownership predicate an operation requires of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnershipRequirement {
    /// No ownership check.
    None,
    /// Caller owns the project the task belongs to, or the target project.
    ProjectOwner,
    /// Caller owns the task itself.
    TaskOwner,
    /// Caller owns the task, or owns the task's project.
    TaskOwnerOrProjectOwner,
}

impl OwnershipRequirement {
    /// Returns `true` when `facts` satisfy the requirement.
    #[must_use]
    pub const fn is_met(self, facts: OwnershipFacts) -> bool {
        match self {
            Self::None => true,
            Self::ProjectOwner => facts.project_owner,
            Self::TaskOwner => facts.task_owner,
            Self::TaskOwnerOrProjectOwner => facts.task_owner || facts.project_owner,
        }
    }

    /// Returns `true` when the task-owner relation must be resolved.
    #[must_use]
    pub const fn needs_task_owner(self) -> bool {
        matches!(self, Self::TaskOwner | Self::TaskOwnerOrProjectOwner)
    }

    /// Returns `true` when the project-owner relation must be resolved.
    #[must_use]
    pub const fn needs_project_owner(self) -> bool {
        matches!(self, Self::ProjectOwner | Self::TaskOwnerOrProjectOwner)
    }
}

impl fmt::Display for OwnershipRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "no ownership",
            Self::ProjectOwner => "project ownership",
            Self::TaskOwner => "task ownership",
            Self::TaskOwnerOrProjectOwner => "task or project ownership",
        })
    }
}

/// Role and ownership an operation requires. Both must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRule {
    role: Option<Role>,
    ownership: OwnershipRequirement,
}

impl AccessRule {
    const fn new(role: Option<Role>, ownership: OwnershipRequirement) -> Self {
        Self { role, ownership }
    }

    /// Returns the required role, or `None` for public operations.
    #[must_use]
    pub const fn role(self) -> Option<Role> {
        self.role
    }

    /// Returns the ownership predicate.
    #[must_use]
    pub const fn ownership(self) -> OwnershipRequirement {
        self.ownership
    }

    /// Returns `true` when the operation needs an authenticated caller.
    #[must_use]
    pub const fn requires_identity(self) -> bool {
        self.role.is_some()
    }
}

/// Ownership relations resolved for one caller and one target.
///
/// Relations that were not looked up stay `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OwnershipFacts {
    /// Caller owns the relevant project.
    pub project_owner: bool,
    /// Caller owns the task.
    pub task_owner: bool,
}

impl OwnershipFacts {
    /// Facts for a caller owning nothing.
    pub const NONE: Self = Self {
        project_owner: false,
        task_owner: false,
    };
}

/// Authorization failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The caller lacks the role the operation requires.
    #[error("{operation} requires the {required} role")]
    MissingRole {
        /// Rejected operation.
        operation: Operation,
        /// Role the operation requires.
        required: Role,
    },

    /// The caller does not hold the required ownership relation.
    #[error("{operation} requires {requirement}")]
    NotOwner {
        /// Rejected operation.
        operation: Operation,
        /// Ownership predicate that failed.
        requirement: OwnershipRequirement,
    },
}

impl AccessDenied {
    /// Returns the client-facing classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Forbidden
    }
}

/// Pure evaluator of the operation decision table.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationDecider;

impl AuthorizationDecider {
    /// Checks the role half of the rule.
    ///
    /// An anonymous caller fails every operation that names a role.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::MissingRole`] when the caller's role does not
    /// satisfy the rule.
    pub fn check_role(
        operation: Operation,
        identity: Option<&Identity>,
    ) -> Result<(), AccessDenied> {
        let Some(required) = operation.rule().role() else {
            return Ok(());
        };
        if identity.is_some_and(|caller| caller.has_role(required)) {
            return Ok(());
        }
        Err(AccessDenied::MissingRole {
            operation,
            required,
        })
    }

    /// Checks the ownership half of the rule.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::NotOwner`] when `facts` do not meet the rule.
    pub const fn check_ownership(
        operation: Operation,
        facts: OwnershipFacts,
    ) -> Result<(), AccessDenied> {
        let requirement = operation.rule().ownership();
        if requirement.is_met(facts) {
            return Ok(());
        }
        Err(AccessDenied::NotOwner {
            operation,
            requirement,
        })
    }

    /// Evaluates the full rule: role first, then ownership.
    ///
    /// # Errors
    ///
    /// Returns the first failing half as [`AccessDenied`].
    pub fn decide(
        operation: Operation,
        identity: Option<&Identity>,
        facts: OwnershipFacts,
    ) -> Result<(), AccessDenied> {
        Self::check_role(operation, identity)?;
        Self::check_ownership(operation, facts)
    }
}
