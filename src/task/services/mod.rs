//! Application services for the task workflow.

mod authorization;
mod ownership;
mod project;
mod workflow;

pub use authorization::{
    AccessDenied, AccessRule, AuthorizationDecider, Operation, OwnershipFacts,
    OwnershipRequirement, RouteMethod,
};
pub use ownership::RepositoryOwnershipOracle;
pub use project::{ProjectService, ProjectServiceError, ProjectServiceResult};
pub use workflow::{TaskDraft, TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService};
