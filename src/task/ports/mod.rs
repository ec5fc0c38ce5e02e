//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod comment;
pub mod ownership;
pub mod project;
pub mod repository;

pub use comment::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
pub use ownership::{OwnershipError, OwnershipOracle, OwnershipResult};
pub use project::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
