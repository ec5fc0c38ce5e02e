//! Error classification shared by every layer of the service.
//!
//! Each layer keeps its own `thiserror` enum; [`ErrorKind`] is the coarse
//! classification those enums report so the HTTP boundary can pick a status
//! code and a stable `kind` string without matching on layer internals.

use serde::Serialize;
use std::fmt;

/// Coarse classification of a failure surfaced to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The referenced resource does not exist.
    NotFound,
    /// The caller lacks the required role or ownership.
    Forbidden,
    /// A workflow guard rejected the operation (for example a closed task).
    InvalidState,
    /// A request value is malformed or out of range.
    InvalidArgument,
    /// The write raced a concurrent write or duplicates an existing record.
    Conflict,
    /// No usable credential accompanied a request that requires one.
    MissingCredential,
    /// The token signature or issuer did not verify.
    InvalidToken,
    /// The token is past its expiry.
    ExpiredToken,
    /// The token could not be decoded into well-formed claims.
    MalformedToken,
    /// Storage or another collaborator failed.
    Internal,
}

impl ErrorKind {
    /// Returns the stable wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::Forbidden => "Forbidden",
            Self::InvalidState => "InvalidState",
            Self::InvalidArgument => "InvalidArgument",
            Self::Conflict => "Conflict",
            Self::MissingCredential => "MissingCredential",
            Self::InvalidToken => "InvalidToken",
            Self::ExpiredToken => "ExpiredToken",
            Self::MalformedToken => "MalformedToken",
            Self::Internal => "Internal",
        }
    }

    /// Returns `true` for the authentication failure kinds.
    #[must_use]
    pub const fn is_authentication_failure(self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::InvalidToken | Self::ExpiredToken | Self::MalformedToken
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
