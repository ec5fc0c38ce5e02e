//! Task repository tests against `PostgreSQL`.

use super::helpers::{repositories, seed_project, subject, task_for};
use mockable::DefaultClock;
use taskgate::task::{
    domain::{Progress, TaskResolution, TaskState},
    ports::{TaskRepository, TaskRepositoryError},
};
use uuid::Uuid;

#[tokio::test(flavor = "multi_thread")]
async fn stored_task_round_trips_every_field() -> eyre::Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let project = seed_project(&repos, "alice").await?;
    let task = task_for("bob", project.id());
    repos.tasks.store(&task).await?;

    let loaded = repos
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(loaded.id() == task.id(), "id mismatch");
    eyre::ensure!(loaded.details() == task.details(), "details mismatch");
    eyre::ensure!(loaded.state() == TaskState::Open, "state mismatch");
    eyre::ensure!(loaded.version() == 0, "version mismatch");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn versioned_update_rejects_stale_copy() -> eyre::Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let project = seed_project(&repos, "alice").await?;
    let original = task_for("bob", project.id());
    repos.tasks.store(&original).await?;

    let mut first = original.clone();
    first.change_resolution(TaskResolution::Fixed, &DefaultClock)?;
    first.change_progress(Progress::new(100)?, &DefaultClock)?;
    let written = repos.tasks.update(&first).await?;
    eyre::ensure!(written.version() == 1, "expected version 1");

    let mut racing = original.clone();
    racing.change_state(TaskState::Closed, &DefaultClock);
    let result = repos.tasks.update(&racing).await;
    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::StaleVersion { .. })),
        "expected StaleVersion, got {result:?}"
    );

    let loaded = repos
        .tasks
        .find_by_id(original.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(
        loaded.resolution() == Some(TaskResolution::Fixed),
        "resolution lost"
    );
    eyre::ensure!(loaded.state() == TaskState::Open, "stale write leaked");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn owner_lookup_and_removal() -> eyre::Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let project = seed_project(&repos, "alice").await?;
    let owner = format!("owner-{}", Uuid::new_v4());
    let first = task_for(&owner, project.id());
    let second = task_for(&owner, project.id());
    repos.tasks.store(&first).await?;
    repos.tasks.store(&second).await?;

    let owned = repos.tasks.find_by_owner(&subject(&owner)).await?;
    eyre::ensure!(owned.len() == 2, "expected two tasks, found {}", owned.len());

    repos.tasks.remove(first.id()).await?;
    let again = repos.tasks.remove(first.id()).await;
    eyre::ensure!(
        matches!(again, Err(TaskRepositoryError::NotFound(_))),
        "expected NotFound, got {again:?}"
    );
    Ok(())
}
