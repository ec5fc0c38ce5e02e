//! Given steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskgate::auth::domain::{Identity, Role, Subject};
use taskgate::task::{domain::TaskType, services::TaskDraft};

#[given(r#"a user "{name}" with role "{role}""#)]
fn a_user(world: &mut TaskWorkflowWorld, name: String, role: String) -> Result<(), eyre::Report> {
    let parsed = Role::try_from(role.as_str()).wrap_err("parse role in scenario")?;
    let subject = Subject::new(name.clone()).wrap_err("build subject in scenario")?;
    world.users.insert(name, Identity::new(subject, parsed));
    Ok(())
}

#[given(r#"a project "{project}" owned by "{owner}""#)]
fn a_project(
    world: &mut TaskWorkflowWorld,
    project: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let caller = world.user(&owner)?;
    let created = run_async(world.projects.create(&caller, project.clone(), None))
        .wrap_err("create project in scenario setup")?;
    world.project_ids.insert(project, created.id());
    Ok(())
}

#[given(r#"a task "{task}" in project "{project}" owned by "{owner}""#)]
fn a_task(
    world: &mut TaskWorkflowWorld,
    task: String,
    project: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let project_id = *world
        .project_ids
        .get(&project)
        .ok_or_else(|| eyre::eyre!("unknown project {project} in scenario world"))?;
    let project_owner = run_async(world.projects.find(project_id))
        .wrap_err("load project in scenario setup")?
        .owner()
        .as_str()
        .to_owned();
    let admin = world.user(&project_owner)?;
    let draft = TaskDraft::new(task.clone(), TaskType::Bug, owner, project_id);
    let created = run_async(world.workflow.create_task(&admin, draft))
        .wrap_err("create task in scenario setup")?;
    world.task_ids.insert(task, created.id());
    Ok(())
}
