//! Request authentication gate.

use crate::auth::{
    domain::{AuthError, Identity},
    ports::TokenVerifier,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Credential scheme accepted in the `Authorization` header.
pub const BEARER_SCHEME: &str = "Bearer";

/// Turns the raw credential header of a request into an [`Identity`].
///
/// The gate holds nothing but the shared verifier; a request either leaves
/// with a verified identity or with the [`AuthError`] that rejected it.
pub struct AuthenticationGate<V>
where
    V: TokenVerifier + ?Sized,
{
    verifier: Arc<V>,
}

impl<V> Clone for AuthenticationGate<V>
where
    V: TokenVerifier + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
        }
    }
}

impl<V> AuthenticationGate<V>
where
    V: TokenVerifier + ?Sized,
{
    /// Creates a gate around a token verifier.
    #[must_use]
    pub const fn new(verifier: Arc<V>) -> Self {
        Self { verifier }
    }

    /// Authenticates a request from its `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredential`] when the header is absent or
    /// not shaped as `Bearer <token>`, otherwise the verifier's error.
    pub fn authenticate(&self, credential: Option<&str>) -> Result<Identity, AuthError> {
        let token = credential
            .ok_or(AuthError::MissingCredential)
            .and_then(extract_bearer_token)
            .inspect_err(|err| {
                warn!(kind = %err.kind(), "request rejected without a usable credential");
            })?;

        match self.verifier.verify(token) {
            Ok(identity) => {
                debug!(
                    subject = %identity.subject(),
                    role = %identity.role(),
                    "request authenticated"
                );
                Ok(identity)
            }
            Err(err) => {
                warn!(kind = %err.kind(), "bearer token rejected");
                Err(err)
            }
        }
    }
}

/// Extracts the token from a `"<scheme> <token>"` header value.
///
/// The scheme comparison ignores ASCII case.
///
/// # Errors
///
/// Returns [`AuthError::MissingCredential`] when the scheme is not `Bearer` or
/// the token part is empty or contains whitespace.
pub fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    let (scheme, rest) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MissingCredential)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::MissingCredential);
    }
    let token = rest.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::MissingCredential);
    }
    Ok(token)
}
