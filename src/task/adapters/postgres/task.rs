//! `PostgreSQL` repository implementation for task storage.

use super::{
    blocking::{PgPool, run_blocking},
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::auth::domain::Subject;
use crate::task::{
    domain::{
        PersistedTaskData, Progress, ProjectId, Task, TaskDetails, TaskId, TaskResolution,
        TaskState, TaskType,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_blocking(&self.pool, TaskRepositoryError::persistence, f).await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let task_id = task.id();
        let expected = task.version();
        let next_version = expected + 1;
        let changeset = to_changeset(task, next_version)?;
        let expected_column =
            i64::try_from(expected).map_err(TaskRepositoryError::persistence)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::version.eq(expected_column)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if affected == 0 {
                let exists = diesel::select(diesel::dsl::exists(
                    tasks::table.filter(tasks::id.eq(task_id.into_inner())),
                ))
                .get_result::<bool>(connection)
                .map_err(TaskRepositoryError::persistence)?;
                return Err(if exists {
                    TaskRepositoryError::StaleVersion { task_id, expected }
                } else {
                    TaskRepositoryError::NotFound(task_id)
                });
            }
            Ok(())
        })
        .await?;

        Ok(task.clone().with_version(next_version))
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn find_by_owner(&self, owner: &Subject) -> TaskRepositoryResult<Vec<Task>> {
        let owner_column = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::owner.eq(owner_column))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let details = task.details();
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        name: details.name().to_owned(),
        description: details.description().map(str::to_owned),
        task_type: details.task_type().as_str().to_owned(),
        owner: details.owner().as_str().to_owned(),
        project_id: details.project().into_inner(),
        state: task.state().as_str().to_owned(),
        resolution: task.resolution().map(|value| value.as_str().to_owned()),
        progress: i16::from(task.progress().value()),
        version: i64::try_from(task.version()).map_err(TaskRepositoryError::persistence)?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(task: &Task, version: u64) -> TaskRepositoryResult<TaskChangeset> {
    let details = task.details();
    Ok(TaskChangeset {
        name: details.name().to_owned(),
        description: details.description().map(str::to_owned),
        task_type: details.task_type().as_str().to_owned(),
        owner: details.owner().as_str().to_owned(),
        project_id: details.project().into_inner(),
        state: task.state().as_str().to_owned(),
        resolution: task.resolution().map(|value| value.as_str().to_owned()),
        progress: i16::from(task.progress().value()),
        version: i64::try_from(version).map_err(TaskRepositoryError::persistence)?,
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let task_type =
        TaskType::try_from(row.task_type.as_str()).map_err(TaskRepositoryError::persistence)?;
    let owner = Subject::new(row.owner).map_err(TaskRepositoryError::persistence)?;
    let mut details =
        TaskDetails::new(row.name, task_type, owner, ProjectId::from_uuid(row.project_id))
            .map_err(TaskRepositoryError::persistence)?;
    if let Some(text) = row.description {
        details = details.with_description(text);
    }

    let state =
        TaskState::try_from(row.state.as_str()).map_err(TaskRepositoryError::persistence)?;
    let resolution = row
        .resolution
        .as_deref()
        .map(TaskResolution::try_from)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let progress =
        Progress::new(i64::from(row.progress)).map_err(TaskRepositoryError::persistence)?;
    let version = u64::try_from(row.version).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        details,
        state,
        resolution,
        progress,
        version,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
