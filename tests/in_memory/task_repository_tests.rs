//! In-memory task repository contract tests.

use super::helpers::{clock, subject, task_for};
use mockable::DefaultClock;
use rstest::rstest;
use taskgate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Progress, ProjectId, TaskId, TaskState},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_identifier(clock: DefaultClock) -> eyre::Result<()> {
    let repo = InMemoryTaskRepository::new();
    let task = task_for("bob", ProjectId::new(), &clock);
    repo.store(&task).await?;

    let result = repo.store(&task).await;
    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "expected DuplicateTask, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_bumps_version_and_rejects_stale_copies(clock: DefaultClock) -> eyre::Result<()> {
    let repo = InMemoryTaskRepository::new();
    let original = task_for("bob", ProjectId::new(), &clock);
    repo.store(&original).await?;

    let mut first = original.clone();
    first.change_progress(Progress::new(20)?, &clock)?;
    let written = repo.update(&first).await?;
    eyre::ensure!(written.version() == 1, "expected version 1");

    let mut racing = original.clone();
    racing.change_state(TaskState::Closed, &clock);
    let result = repo.update(&racing).await;
    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::StaleVersion { expected: 0, .. })),
        "expected StaleVersion, got {result:?}"
    );

    let stored = repo
        .find_by_id(original.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(stored.state() == TaskState::Open, "stale write leaked");
    eyre::ensure!(stored.progress().value() == 20, "first write lost");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_remove_of_unknown_task_are_not_found(clock: DefaultClock) -> eyre::Result<()> {
    let repo = InMemoryTaskRepository::new();
    let task = task_for("bob", ProjectId::new(), &clock);

    let update = repo.update(&task).await;
    eyre::ensure!(
        matches!(update, Err(TaskRepositoryError::NotFound(_))),
        "expected NotFound on update, got {update:?}"
    );
    let missing = TaskId::new();
    let remove = repo.remove(missing).await;
    eyre::ensure!(
        matches!(remove, Err(TaskRepositoryError::NotFound(id)) if id == missing),
        "expected NotFound on remove, got {remove:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_are_oldest_first_and_filter_by_owner(clock: DefaultClock) -> eyre::Result<()> {
    let repo = InMemoryTaskRepository::new();
    let project = ProjectId::new();
    let first = task_for("bob", project, &clock);
    let second = task_for("carol", project, &clock);
    let third = task_for("bob", project, &clock);
    for task in [&first, &second, &third] {
        repo.store(task).await?;
    }

    let all = repo.find_all().await?;
    eyre::ensure!(all.len() == 3, "expected three tasks");
    eyre::ensure!(
        all.windows(2).all(|pair| match pair {
            [a, b] => a.created_at() <= b.created_at(),
            _ => true,
        }),
        "tasks are not ordered by creation time"
    );

    let bobs = repo.find_by_owner(&subject("bob")).await?;
    eyre::ensure!(bobs.len() == 2, "expected two tasks for bob");
    eyre::ensure!(
        bobs.iter().all(|task| task.owner().as_str() == "bob"),
        "owner filter leaked"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_deletes_the_task(clock: DefaultClock) -> eyre::Result<()> {
    let repo = InMemoryTaskRepository::new();
    let task = task_for("bob", ProjectId::new(), &clock);
    repo.store(&task).await?;
    repo.remove(task.id()).await?;

    eyre::ensure!(
        repo.find_by_id(task.id()).await?.is_none(),
        "task should be gone"
    );
    Ok(())
}
