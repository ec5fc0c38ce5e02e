//! Project and comment repository tests against `PostgreSQL`.

use super::helpers::{repositories, seed_project, subject, task_for};
use mockable::DefaultClock;
use taskgate::task::{
    domain::Comment,
    ports::{CommentRepository, ProjectRepository, ProjectRepositoryError, TaskRepository},
};

#[tokio::test(flavor = "multi_thread")]
async fn project_is_found_and_duplicates_rejected() -> eyre::Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let project = seed_project(&repos, "alice").await?;

    let loaded = repos
        .projects
        .find_by_id(project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project should exist"))?;
    eyre::ensure!(loaded.name() == project.name(), "name mismatch");
    eyre::ensure!(loaded.owner() == project.owner(), "owner mismatch");
    let duplicate = repos.projects.store(&project).await;
    eyre::ensure!(
        matches!(duplicate, Err(ProjectRepositoryError::DuplicateProject(_))),
        "expected DuplicateProject, got {duplicate:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn comments_follow_their_task() -> eyre::Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let project = seed_project(&repos, "alice").await?;
    let task = task_for("bob", project.id());
    repos.tasks.store(&task).await?;
    let comment = Comment::new(task.id(), subject("carol"), "Persisted", &DefaultClock)?;
    repos.comments.store(&comment).await?;

    let listed = repos.comments.find_by_task(task.id()).await?;
    eyre::ensure!(listed.len() == 1, "expected one comment");

    repos.tasks.remove(task.id()).await?;
    eyre::ensure!(
        repos.comments.find_by_id(comment.id()).await?.is_none(),
        "comment should be removed with its task"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn comments_are_removed_by_task() -> eyre::Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let project = seed_project(&repos, "alice").await?;
    let task = task_for("bob", project.id());
    repos.tasks.store(&task).await?;
    for text in ["One", "Two"] {
        let comment = Comment::new(task.id(), subject("carol"), text, &DefaultClock)?;
        repos.comments.store(&comment).await?;
    }

    let removed = repos.comments.remove_by_task(task.id()).await?;
    eyre::ensure!(removed == 2, "expected two removed comments, got {removed}");
    eyre::ensure!(
        repos.comments.find_by_task(task.id()).await?.is_empty(),
        "comments should be gone"
    );
    Ok(())
}
