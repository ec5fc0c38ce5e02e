//! Shared fixtures: three callers and one project with one task.
//!
//! `alice` is an admin owning the project, `bob` is a user owning the task,
//! and `carol` is a user owning nothing.

use crate::auth::domain::{Identity, Role, Subject};
use crate::task::{
    adapters::memory::{
        InMemoryCommentRepository, InMemoryProjectRepository, InMemoryTaskRepository,
    },
    domain::{Project, ProjectId, Task, TaskDetails, TaskId, TaskType},
    ports::{ProjectRepository, TaskRepository},
    services::{ProjectService, RepositoryOwnershipOracle, TaskWorkflowService},
};
use mockable::DefaultClock;
use std::sync::Arc;

pub type MemoryOracle =
    RepositoryOwnershipOracle<InMemoryProjectRepository, InMemoryTaskRepository>;

pub type MemoryWorkflow = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryCommentRepository,
    MemoryOracle,
    DefaultClock,
>;

pub fn identity(name: &str, role: Role) -> Identity {
    Identity::new(Subject::new(name).expect("valid subject"), role)
}

pub fn alice() -> Identity {
    identity("alice", Role::Admin)
}

pub fn bob() -> Identity {
    identity("bob", Role::User)
}

pub fn carol() -> Identity {
    identity("carol", Role::User)
}

pub struct Seeded {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub comments: Arc<InMemoryCommentRepository>,
    pub workflow: MemoryWorkflow,
    pub project_service: ProjectService<InMemoryProjectRepository, DefaultClock>,
    pub project_id: ProjectId,
    pub task_id: TaskId,
}

impl Seeded {
    pub async fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let comments = Arc::new(InMemoryCommentRepository::new());
        let clock = Arc::new(DefaultClock);

        let project = Project::new("P3", None, alice().subject().clone(), &*clock)
            .expect("valid project");
        projects.store(&project).await.expect("project stored");
        let details = TaskDetails::new("T7", TaskType::Bug, bob().subject().clone(), project.id())
            .expect("valid details");
        let task = Task::new(details, &*clock);
        tasks.store(&task).await.expect("task stored");

        let oracle = Arc::new(RepositoryOwnershipOracle::new(
            Arc::clone(&projects),
            Arc::clone(&tasks),
        ));
        let workflow = TaskWorkflowService::new(
            Arc::clone(&tasks),
            Arc::clone(&comments),
            oracle,
            Arc::clone(&clock),
        );
        let project_service = ProjectService::new(Arc::clone(&projects), clock);

        Self {
            tasks,
            projects,
            comments,
            workflow,
            project_service,
            project_id: project.id(),
            task_id: task.id(),
        }
    }

    pub async fn stored_task(&self) -> Task {
        self.tasks
            .find_by_id(self.task_id)
            .await
            .expect("lookup succeeds")
            .expect("seeded task exists")
    }
}
