//! Thread-safe in-memory repositories for tests and single-process runs.

mod comment;
mod project;
mod task;

pub use comment::InMemoryCommentRepository;
pub use project::InMemoryProjectRepository;
pub use task::InMemoryTaskRepository;
