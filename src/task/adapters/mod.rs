//! Persistence adapters for the task module.
//!
//! # Available Adapters
//!
//! - [`memory`]: Thread-safe in-memory storage for tests and local runs
//! - [`postgres`]: `PostgreSQL` persistence using Diesel ORM

pub mod memory;
pub mod postgres;
