//! Shared world state for task workflow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskgate::auth::domain::Identity;
use taskgate::error::ErrorKind;
use taskgate::task::{
    adapters::memory::{
        InMemoryCommentRepository, InMemoryProjectRepository, InMemoryTaskRepository,
    },
    domain::{ProjectId, TaskId},
    services::{ProjectService, RepositoryOwnershipOracle, TaskWorkflowService},
};

/// Ownership oracle over the in-memory repositories.
pub type TestOracle =
    RepositoryOwnershipOracle<InMemoryProjectRepository, InMemoryTaskRepository>;

/// Workflow service type used by the BDD world.
pub type TestWorkflow = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    TestOracle,
    DefaultClock,
>;

/// Scenario world for task workflow behaviour tests.
pub struct TaskWorkflowWorld {
    pub workflow: TestWorkflow,
    pub projects: ProjectService<InMemoryProjectRepository, DefaultClock>,
    pub comments: Arc<InMemoryCommentRepository>,
    pub users: HashMap<String, Identity>,
    pub project_ids: HashMap<String, ProjectId>,
    pub task_ids: HashMap<String, TaskId>,
    pub last_outcome: Option<Result<(), ErrorKind>>,
}

impl TaskWorkflowWorld {
    /// Creates a world over empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let comments = Arc::new(InMemoryCommentRepository::new());
        let clock = Arc::new(DefaultClock);
        let oracle = Arc::new(RepositoryOwnershipOracle::new(
            Arc::clone(&projects),
            Arc::clone(&tasks),
        ));

        Self {
            workflow: TaskWorkflowService::new(
                tasks,
                Arc::clone(&comments),
                oracle,
                Arc::clone(&clock),
            ),
            projects: ProjectService::new(projects, clock),
            comments,
            users: HashMap::new(),
            project_ids: HashMap::new(),
            task_ids: HashMap::new(),
            last_outcome: None,
        }
    }

    /// Returns the identity registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if no user was registered under that name.
    pub fn user(&self, name: &str) -> Result<Identity, eyre::Report> {
        self.users
            .get(name)
            .cloned()
            .ok_or_else(|| eyre::eyre!("unknown user {name} in scenario world"))
    }

    /// Returns the identifier of the task named `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if no task was created under that name.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown task {name} in scenario world"))
    }

    /// Records the outcome of the latest `When` step.
    pub fn record<T, E>(&mut self, result: Result<T, E>, kind: impl Fn(&E) -> ErrorKind) {
        self.last_outcome = Some(result.map(|_| ()).map_err(|err| kind(&err)));
    }
}

impl Default for TaskWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorkflowWorld {
    TaskWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
