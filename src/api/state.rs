//! Shared handler state.

use crate::auth::{ports::TokenVerifier, services::AuthenticationGate};
use crate::task::{
    adapters::memory::{
        InMemoryCommentRepository, InMemoryProjectRepository, InMemoryTaskRepository,
    },
    ports::{CommentRepository, OwnershipOracle, ProjectRepository, TaskRepository},
    services::{ProjectService, RepositoryOwnershipOracle, TaskWorkflowService},
};
use mockable::DefaultClock;
use std::sync::Arc;

/// Task workflow service over type-erased backends.
pub type SharedTaskWorkflow = TaskWorkflowService<
    dyn TaskRepository,
    dyn CommentRepository,
    dyn OwnershipOracle,
    DefaultClock,
>;

/// Project service over a type-erased backend.
pub type SharedProjectService = ProjectService<dyn ProjectRepository, DefaultClock>;

/// Storage backends the HTTP surface runs against.
#[derive(Clone)]
pub struct Backends {
    /// Task storage.
    pub tasks: Arc<dyn TaskRepository>,
    /// Project storage.
    pub projects: Arc<dyn ProjectRepository>,
    /// Comment storage.
    pub comments: Arc<dyn CommentRepository>,
}

impl Backends {
    /// Creates empty in-memory backends.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepository::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
        }
    }
}

/// State cloned into every handler: the gate and the services.
#[derive(Clone)]
pub struct AppState {
    gate: AuthenticationGate<dyn TokenVerifier>,
    workflow: SharedTaskWorkflow,
    projects: SharedProjectService,
}

impl AppState {
    /// Wires the gate and services over `backends`.
    #[must_use]
    pub fn new(verifier: Arc<dyn TokenVerifier>, backends: Backends) -> Self {
        let clock = Arc::new(DefaultClock);
        let ownership: Arc<dyn OwnershipOracle> = Arc::new(RepositoryOwnershipOracle::new(
            Arc::clone(&backends.projects),
            Arc::clone(&backends.tasks),
        ));
        Self {
            gate: AuthenticationGate::new(verifier),
            workflow: TaskWorkflowService::new(
                backends.tasks,
                backends.comments,
                ownership,
                Arc::clone(&clock),
            ),
            projects: ProjectService::new(backends.projects, clock),
        }
    }

    /// Returns the authentication gate.
    #[must_use]
    pub const fn gate(&self) -> &AuthenticationGate<dyn TokenVerifier> {
        &self.gate
    }

    /// Returns the task workflow service.
    #[must_use]
    pub const fn workflow(&self) -> &SharedTaskWorkflow {
        &self.workflow
    }

    /// Returns the project service.
    #[must_use]
    pub const fn projects(&self) -> &SharedProjectService {
        &self.projects
    }
}
