//! In-memory comment repository contract tests.

use super::helpers::{clock, subject};
use mockable::DefaultClock;
use rstest::rstest;
use taskgate::task::{
    adapters::memory::InMemoryCommentRepository,
    domain::{Comment, TaskId},
    ports::{CommentRepository, CommentRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_are_indexed_by_task(clock: DefaultClock) -> eyre::Result<()> {
    let repo = InMemoryCommentRepository::new();
    let task = TaskId::new();
    let other = TaskId::new();
    let first = Comment::new(task, subject("carol"), "First", &clock)?;
    let second = Comment::new(task, subject("bob"), "Second", &clock)?;
    let elsewhere = Comment::new(other, subject("bob"), "Elsewhere", &clock)?;
    for comment in [&first, &second, &elsewhere] {
        repo.store(comment).await?;
    }

    let found = repo.find_by_task(task).await?;
    eyre::ensure!(found == vec![first.clone(), second], "unexpected comments {found:?}");
    eyre::ensure!(
        repo.find_by_id(first.id()).await?.as_ref() == Some(&first),
        "comment not found by id"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_comment_is_rejected(clock: DefaultClock) -> eyre::Result<()> {
    let repo = InMemoryCommentRepository::new();
    let comment = Comment::new(TaskId::new(), subject("carol"), "Hello", &clock)?;
    repo.store(&comment).await?;

    let result = repo.store(&comment).await;
    eyre::ensure!(
        matches!(result, Err(CommentRepositoryError::DuplicateComment(_))),
        "expected DuplicateComment, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_by_task_spares_other_tasks(clock: DefaultClock) -> eyre::Result<()> {
    let repo = InMemoryCommentRepository::new();
    let task = TaskId::new();
    let other = TaskId::new();
    let doomed = Comment::new(task, subject("carol"), "Doomed", &clock)?;
    let kept = Comment::new(other, subject("bob"), "Kept", &clock)?;
    repo.store(&doomed).await?;
    repo.store(&kept).await?;

    let removed = repo.remove_by_task(task).await?;
    eyre::ensure!(removed == 1, "expected one removed comment, got {removed}");
    eyre::ensure!(
        repo.find_by_id(doomed.id()).await?.is_none(),
        "removed comment still found by id"
    );
    eyre::ensure!(
        repo.find_by_task(other).await? == vec![kept],
        "comments of other tasks must survive"
    );
    eyre::ensure!(
        repo.remove_by_task(task).await? == 0,
        "second removal should find nothing"
    );
    Ok(())
}
