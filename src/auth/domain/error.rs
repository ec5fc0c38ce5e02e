//! Error types for authentication values and token verification.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthDomainError {
    /// The subject is empty after trimming.
    #[error("subject must not be empty")]
    EmptySubject,
}

/// Error returned while parsing a role claim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Reasons a request fails authentication.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header, or one that is not `Bearer <token>`.
    #[error("missing or malformed bearer credential")]
    MissingCredential,

    /// The token signature or issuer did not verify.
    #[error("token signature is invalid")]
    InvalidToken,

    /// The token expiry is in the past.
    #[error("token has expired")]
    ExpiredToken,

    /// The token claims could not be decoded.
    #[error("token claims are malformed: {0}")]
    MalformedToken(String),
}

impl AuthError {
    /// Returns the client-facing classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential => ErrorKind::MissingCredential,
            Self::InvalidToken => ErrorKind::InvalidToken,
            Self::ExpiredToken => ErrorKind::ExpiredToken,
            Self::MalformedToken(_) => ErrorKind::MalformedToken,
        }
    }
}
