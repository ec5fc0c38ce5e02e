//! `PostgreSQL` repository implementation for project storage.

use super::{
    blocking::{PgPool, run_blocking},
    models::{NewProjectRow, ProjectRow},
    schema::projects,
};
use crate::auth::domain::Subject;
use crate::task::{
    domain::{PersistedProjectData, Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = NewProjectRow {
            id: project_id.into_inner(),
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            owner: project.owner().as_str().to_owned(),
            created_at: project.created_at(),
        };

        run_blocking(
            &self.pool,
            ProjectRepositoryError::persistence,
            move |connection| {
                diesel::insert_into(projects::table)
                    .values(&new_row)
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            ProjectRepositoryError::DuplicateProject(project_id)
                        }
                        _ => ProjectRepositoryError::persistence(err),
                    })?;
                Ok(())
            },
        )
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        run_blocking(
            &self.pool,
            ProjectRepositoryError::persistence,
            move |connection| {
                projects::table
                    .filter(projects::id.eq(id.into_inner()))
                    .select(ProjectRow::as_select())
                    .first::<ProjectRow>(connection)
                    .optional()
                    .map_err(ProjectRepositoryError::persistence)?
                    .map(row_to_project)
                    .transpose()
            },
        )
        .await
    }

    async fn find_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        run_blocking(
            &self.pool,
            ProjectRepositoryError::persistence,
            move |connection| {
                projects::table
                    .order((projects::created_at.asc(), projects::id.asc()))
                    .select(ProjectRow::as_select())
                    .load::<ProjectRow>(connection)
                    .map_err(ProjectRepositoryError::persistence)?
                    .into_iter()
                    .map(row_to_project)
                    .collect()
            },
        )
        .await
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let owner = Subject::new(row.owner).map_err(ProjectRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        owner,
        created_at: row.created_at,
    }))
}
