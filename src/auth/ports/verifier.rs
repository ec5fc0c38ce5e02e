//! Token verification port consumed by the authentication gate.

use crate::auth::domain::{AuthError, Identity};

/// Verifies a bearer token and yields the identity it carries.
///
/// Implementations must be pure functions of the token and immutable key
/// material so one instance can serve every request concurrently.
pub trait TokenVerifier: Send + Sync {
    /// Verifies `token` and returns the embedded identity unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] when the signature does not verify,
    /// [`AuthError::ExpiredToken`] when the token is past expiry, and
    /// [`AuthError::MalformedToken`] when the claims cannot be parsed.
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}
