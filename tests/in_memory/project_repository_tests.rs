//! In-memory project repository contract tests.

use super::helpers::{clock, subject};
use mockable::DefaultClock;
use rstest::rstest;
use taskgate::task::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_project_is_found_and_listed(clock: DefaultClock) -> eyre::Result<()> {
    let repo = InMemoryProjectRepository::new();
    let project = Project::new("Platform", None, subject("alice"), &clock)?;
    repo.store(&project).await?;

    eyre::ensure!(
        repo.find_by_id(project.id()).await?.as_ref() == Some(&project),
        "project not found by id"
    );
    eyre::ensure!(repo.find_all().await? == vec![project], "listing mismatch");
    eyre::ensure!(
        repo.find_by_id(ProjectId::new()).await?.is_none(),
        "unknown id should be absent"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_project_is_rejected(clock: DefaultClock) -> eyre::Result<()> {
    let repo = InMemoryProjectRepository::new();
    let project = Project::new("Platform", None, subject("alice"), &clock)?;
    repo.store(&project).await?;

    let result = repo.store(&project).await;
    eyre::ensure!(
        matches!(result, Err(ProjectRepositoryError::DuplicateProject(id)) if id == project.id()),
        "expected DuplicateProject, got {result:?}"
    );
    Ok(())
}
