//! Port contracts for authentication.

pub mod verifier;

pub use verifier::TokenVerifier;
