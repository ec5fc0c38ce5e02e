//! Then steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use rstest_bdd_macros::then;
use taskgate::task::{domain::TaskResolution, ports::CommentRepository};

#[then("the last operation succeeds")]
fn last_operation_succeeds(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    match world.last_outcome {
        Some(Ok(())) => Ok(()),
        Some(Err(kind)) => Err(eyre::eyre!("expected success, got {kind}")),
        None => Err(eyre::eyre!("no operation was attempted")),
    }
}

#[then(r#"the last operation fails with "{kind}""#)]
fn last_operation_fails_with(world: &TaskWorkflowWorld, kind: String) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .ok_or_else(|| eyre::eyre!("no operation was attempted"))?;
    match outcome {
        Err(actual) if actual.as_str() == kind => Ok(()),
        other => Err(eyre::eyre!("expected {kind} failure, got {other:?}")),
    }
}

#[then(r#"task "{task}" has no resolution"#)]
fn task_has_no_resolution(world: &TaskWorkflowWorld, task: String) -> Result<(), eyre::Report> {
    let stored = run_async(world.workflow.find_task(world.task_id(&task)?))?;
    eyre::ensure!(
        stored.resolution().is_none(),
        "expected no resolution, found {:?}",
        stored.resolution()
    );
    Ok(())
}

#[then(r#"task "{task}" has resolution "{resolution}""#)]
fn task_has_resolution(
    world: &TaskWorkflowWorld,
    task: String,
    resolution: String,
) -> Result<(), eyre::Report> {
    let expected = TaskResolution::try_from(resolution.as_str())
        .map_err(|err| eyre::eyre!("invalid resolution in scenario: {err}"))?;
    let stored = run_async(world.workflow.find_task(world.task_id(&task)?))?;
    eyre::ensure!(
        stored.resolution() == Some(expected),
        "expected {expected}, found {:?}",
        stored.resolution()
    );
    Ok(())
}

#[then(r#"task "{task}" has progress {progress:u8}"#)]
fn task_has_progress(
    world: &TaskWorkflowWorld,
    task: String,
    progress: u8,
) -> Result<(), eyre::Report> {
    let stored = run_async(world.workflow.find_task(world.task_id(&task)?))?;
    eyre::ensure!(
        stored.progress().value() == progress,
        "expected progress {progress}, found {}",
        stored.progress()
    );
    Ok(())
}

#[then(r#"task "{task}" has {count:usize} comment"#)]
fn task_has_comments(
    world: &TaskWorkflowWorld,
    task: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let comments = run_async(world.comments.find_by_task(world.task_id(&task)?))?;
    eyre::ensure!(
        comments.len() == count,
        "expected {count} comments, found {}",
        comments.len()
    );
    Ok(())
}
