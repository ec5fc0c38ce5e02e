//! Shared test helpers for `PostgreSQL` integration tests.

use mockable::DefaultClock;
use std::sync::Arc;
use taskgate::auth::domain::Subject;
use taskgate::task::{
    adapters::postgres::{
        PgPool, PostgresCommentRepository, PostgresProjectRepository, PostgresTaskRepository,
        apply_schema, connect,
    },
    domain::{Project, ProjectId, Task, TaskDetails, TaskType},
    ports::ProjectRepository,
};

/// Variable naming the database the tests run against.
pub const TEST_DATABASE_URL_VAR: &str = "TASKGATE_TEST_DATABASE_URL";

/// Repositories sharing one pool.
pub struct Repositories {
    pub tasks: Arc<PostgresTaskRepository>,
    pub projects: Arc<PostgresProjectRepository>,
    pub comments: Arc<PostgresCommentRepository>,
}

/// Connects to the test database and applies the schema.
///
/// Returns `None` when [`TEST_DATABASE_URL_VAR`] is unset.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or the schema fails to apply.
pub async fn repositories() -> eyre::Result<Option<Repositories>> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL_VAR) else {
        return Ok(None);
    };
    let pool: PgPool = connect(&url, 2)?;
    apply_schema(&pool).await?;
    Ok(Some(Repositories {
        tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
        projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
        comments: Arc::new(PostgresCommentRepository::new(pool)),
    }))
}

/// Builds a subject, failing the test on invalid input.
pub fn subject(name: &str) -> Subject {
    Subject::new(name).expect("valid subject")
}

/// Stores a fresh project owned by `owner`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn seed_project(repos: &Repositories, owner: &str) -> eyre::Result<Project> {
    let project = Project::new("Integration", None, subject(owner), &DefaultClock)?;
    repos.projects.store(&project).await?;
    Ok(project)
}

/// Builds an open task owned by `owner` in `project`.
pub fn task_for(owner: &str, project: ProjectId) -> Task {
    let details = TaskDetails::new("Persisted task", TaskType::Feature, subject(owner), project)
        .expect("valid details")
        .with_description("stored through diesel");
    Task::new(details, &DefaultClock)
}
