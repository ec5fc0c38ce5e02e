//! `PostgreSQL` repository implementation for comment storage.

use super::{
    blocking::{PgPool, run_blocking},
    models::{CommentRow, NewCommentRow},
    schema::comments,
};
use crate::auth::domain::Subject;
use crate::task::{
    domain::{Comment, CommentId, PersistedCommentData, TaskId},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let new_row = NewCommentRow {
            id: comment_id.into_inner(),
            task_id: comment.task_id().into_inner(),
            author: comment.author().as_str().to_owned(),
            text: comment.text().to_owned(),
            created_at: comment.created_at(),
        };

        run_blocking(
            &self.pool,
            CommentRepositoryError::persistence,
            move |connection| {
                diesel::insert_into(comments::table)
                    .values(&new_row)
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            CommentRepositoryError::DuplicateComment(comment_id)
                        }
                        _ => CommentRepositoryError::persistence(err),
                    })?;
                Ok(())
            },
        )
        .await
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        run_blocking(
            &self.pool,
            CommentRepositoryError::persistence,
            move |connection| {
                comments::table
                    .filter(comments::id.eq(id.into_inner()))
                    .select(CommentRow::as_select())
                    .first::<CommentRow>(connection)
                    .optional()
                    .map_err(CommentRepositoryError::persistence)?
                    .map(row_to_comment)
                    .transpose()
            },
        )
        .await
    }

    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        run_blocking(
            &self.pool,
            CommentRepositoryError::persistence,
            move |connection| {
                comments::table
                    .filter(comments::task_id.eq(task_id.into_inner()))
                    .order((comments::created_at.asc(), comments::id.asc()))
                    .select(CommentRow::as_select())
                    .load::<CommentRow>(connection)
                    .map_err(CommentRepositoryError::persistence)?
                    .into_iter()
                    .map(row_to_comment)
                    .collect()
            },
        )
        .await
    }

    async fn remove_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<usize> {
        run_blocking(
            &self.pool,
            CommentRepositoryError::persistence,
            move |connection| {
                diesel::delete(comments::table.filter(comments::task_id.eq(task_id.into_inner())))
                    .execute(connection)
                    .map_err(CommentRepositoryError::persistence)
            },
        )
        .await
    }
}

fn row_to_comment(row: CommentRow) -> CommentRepositoryResult<Comment> {
    let author = Subject::new(row.author).map_err(CommentRepositoryError::persistence)?;
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        author,
        text: row.text,
        created_at: row.created_at,
    }))
}
