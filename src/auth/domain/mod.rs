//! Domain model for authenticated callers.
//!
//! Identities are value types derived from verified tokens; nothing here
//! touches headers, keys, or storage.

mod error;
mod identity;
mod role;

pub use error::{AuthDomainError, AuthError, ParseRoleError};
pub use identity::{Identity, Subject};
pub use role::Role;
