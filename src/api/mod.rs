//! JSON-over-HTTP surface.
//!
//! Handlers are thin: they extract the caller's [`Identity`] placed by the
//! authentication stage, call the task or project service, and map the
//! service error onto a status code. All authorization happens in the
//! services.
//!
//! [`Identity`]: crate::auth::domain::Identity

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::router;
pub use state::{AppState, Backends};
