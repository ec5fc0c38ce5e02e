//! Blocking operation helpers for the `PostgreSQL` repositories.
//!
//! Diesel connections are synchronous, so every query runs on tokio's blocking
//! pool with a connection checked out of the r2d2 pool.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// Schema DDL applied by [`apply_schema`]. Every statement is idempotent.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_taskgate_tables/up.sql");

/// `PostgreSQL` connection pool type shared by the task adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be established.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(database_url))
}

/// Infrastructure failure raised before a query could run.
#[derive(Debug, Error)]
pub enum BlockingError {
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// A statement failed.
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Creates the project, task and comment tables when they are missing.
///
/// # Errors
///
/// Returns [`BlockingError`] when no connection is available or the DDL fails.
pub async fn apply_schema(pool: &PgPool) -> Result<(), BlockingError> {
    run_blocking(pool, std::convert::identity, |connection| {
        connection
            .batch_execute(SCHEMA_SQL)
            .map_err(BlockingError::from)
    })
    .await
}

/// Runs `f` with a pooled connection on the blocking thread pool.
///
/// `map_err` converts pool and join failures into the caller's error type.
pub(super) async fn run_blocking<F, T, E, M>(pool: &PgPool, map_err: M, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: Fn(BlockingError) -> E + Copy + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool
            .get()
            .map_err(|err| map_err(BlockingError::from(err)))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| map_err(BlockingError::from(err)))?
}
