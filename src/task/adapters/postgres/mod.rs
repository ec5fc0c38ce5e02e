//! `PostgreSQL` adapters for task, project and comment persistence.
//!
//! The schema lives in `migrations/`. It is applied either with the Diesel CLI
//! or at startup through [`apply_schema`].

mod blocking;
mod comment;
mod models;
mod project;
mod schema;
mod task;

pub use blocking::{BlockingError, PgPool, SCHEMA_SQL, apply_schema, connect};
pub use comment::PostgresCommentRepository;
pub use project::PostgresProjectRepository;
pub use task::PostgresTaskRepository;
