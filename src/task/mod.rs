//! Tasks, projects and comments behind role and ownership checks.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types and the task state machine in [`domain`]
//! - Port contracts for storage and ownership in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The decision table and orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
