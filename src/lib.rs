//! Taskgate: task tracking with stateless bearer-token access control.
//!
//! Every mutating request is authenticated from its own `Authorization`
//! header, then checked against a fixed role and ownership table before the
//! task workflow applies it.
//!
//! # Architecture
//!
//! Taskgate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, tokens)
//!
//! # Modules
//!
//! - [`auth`]: Token verification and the request authentication gate
//! - [`task`]: Tasks, projects, comments, authorization and workflow rules
//! - [`api`]: JSON-over-HTTP routes
//! - [`config`]: Startup configuration
//! - [`error`]: Error classification shared across layers

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod task;
