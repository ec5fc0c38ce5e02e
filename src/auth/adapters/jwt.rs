//! HS256 JSON Web Token codec.
//!
//! Tokens carry `sub`, `role`, `exp`, `iat` and `iss` claims. Verification is a
//! pure function of the token and the key material captured when the codec is
//! built, so a single codec is shared across all request tasks.

use crate::auth::{
    domain::{AuthError, Identity, Role, Subject},
    ports::TokenVerifier,
};
use chrono::TimeDelta;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind as JwtErrorKind,
};
use mockable::Clock;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest accepted signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Issuer claim used when none is configured.
pub const DEFAULT_ISSUER: &str = "taskgate";

/// Token lifetime in seconds used when none is configured.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Errors returned while building a [`JwtConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtConfigError {
    /// The signing secret is shorter than [`MIN_SECRET_LEN`].
    #[error("signing secret must be at least {min} bytes, got {actual}")]
    SecretTooShort {
        /// Minimum accepted length.
        min: usize,
        /// Length of the supplied secret.
        actual: usize,
    },

    /// The issuer is empty after trimming.
    #[error("token issuer must not be empty")]
    EmptyIssuer,

    /// The token lifetime is zero or negative.
    #[error("token lifetime must be positive, got {0} seconds")]
    NonPositiveTtl(i64),
}

/// Errors returned while minting a token.
#[derive(Debug, Error)]
pub enum TokenIssueError {
    /// The expiry timestamp overflowed.
    #[error("token expiry is out of range")]
    ExpiryOutOfRange,

    /// Signing failed.
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Immutable token key material and policy, loaded once at startup.
#[derive(Debug)]
pub struct JwtConfig {
    secret: SecretString,
    issuer: String,
    token_ttl: TimeDelta,
    leeway_secs: u64,
}

impl JwtConfig {
    /// Creates a configuration with the default lifetime and zero leeway.
    ///
    /// # Errors
    ///
    /// Returns [`JwtConfigError::SecretTooShort`] when the secret is shorter
    /// than [`MIN_SECRET_LEN`] bytes or [`JwtConfigError::EmptyIssuer`] when
    /// the issuer is blank.
    pub fn new(secret: SecretString, issuer: impl Into<String>) -> Result<Self, JwtConfigError> {
        let actual = secret.expose_secret().len();
        if actual < MIN_SECRET_LEN {
            return Err(JwtConfigError::SecretTooShort {
                min: MIN_SECRET_LEN,
                actual,
            });
        }
        let raw_issuer = issuer.into();
        let trimmed_issuer = raw_issuer.trim();
        if trimmed_issuer.is_empty() {
            return Err(JwtConfigError::EmptyIssuer);
        }
        Ok(Self {
            secret,
            issuer: trimmed_issuer.to_owned(),
            token_ttl: TimeDelta::seconds(DEFAULT_TOKEN_TTL_SECS),
            leeway_secs: 0,
        })
    }

    /// Sets the lifetime of issued tokens.
    ///
    /// # Errors
    ///
    /// Returns [`JwtConfigError::NonPositiveTtl`] when `ttl` is not positive.
    pub fn with_token_ttl(mut self, ttl: TimeDelta) -> Result<Self, JwtConfigError> {
        if ttl <= TimeDelta::zero() {
            return Err(JwtConfigError::NonPositiveTtl(ttl.num_seconds()));
        }
        self.token_ttl = ttl;
        Ok(self)
    }

    /// Sets the clock-skew allowance applied to `exp`.
    #[must_use]
    pub const fn with_leeway_secs(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// Returns the expected issuer claim.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Returns the lifetime of issued tokens.
    #[must_use]
    pub const fn token_ttl(&self) -> TimeDelta {
        self.token_ttl
    }

    /// Returns the clock-skew allowance in seconds.
    #[must_use]
    pub const fn leeway_secs(&self) -> u64 {
        self.leeway_secs
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: String,
    role: Role,
    exp: i64,
    iat: i64,
    iss: String,
}

/// Signs and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    token_ttl: TimeDelta,
}

impl JwtTokenCodec {
    /// Builds a codec from immutable configuration.
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.set_issuer(&[config.issuer()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: config.issuer.clone(),
            token_ttl: config.token_ttl,
        }
    }

    /// Mints a token for `identity` with the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`TokenIssueError`] when the expiry overflows or signing fails.
    pub fn issue(
        &self,
        identity: &Identity,
        clock: &impl Clock,
    ) -> Result<String, TokenIssueError> {
        self.issue_with_ttl(identity, self.token_ttl, clock)
    }

    /// Mints a token for `identity` that expires `ttl` after the clock's now.
    ///
    /// A negative `ttl` yields an already-expired token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenIssueError`] when the expiry overflows or signing fails.
    pub fn issue_with_ttl(
        &self,
        identity: &Identity,
        ttl: TimeDelta,
        clock: &impl Clock,
    ) -> Result<String, TokenIssueError> {
        let issued_at = clock.utc();
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenIssueError::ExpiryOutOfRange)?;
        let claims = TokenClaims {
            sub: identity.subject().as_str().to_owned(),
            role: identity.role(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            iss: self.issuer.clone(),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Mints a token that expires `ttl_secs` seconds after the clock's now.
    ///
    /// # Errors
    ///
    /// Returns [`TokenIssueError::ExpiryOutOfRange`] when `ttl_secs` does not
    /// fit a [`TimeDelta`] or the expiry overflows, and
    /// [`TokenIssueError::Signing`] when signing fails.
    pub fn issue_for_secs(
        &self,
        identity: &Identity,
        ttl_secs: i64,
        clock: &impl Clock,
    ) -> Result<String, TokenIssueError> {
        let ttl = TimeDelta::try_seconds(ttl_secs).ok_or(TokenIssueError::ExpiryOutOfRange)?;
        self.issue_with_ttl(identity, ttl, clock)
    }
}

impl TokenVerifier for JwtTokenCodec {
    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| map_decode_error(&err))?;
        let subject = Subject::new(data.claims.sub)
            .map_err(|err| AuthError::MalformedToken(err.to_string()))?;
        Ok(Identity::new(subject, data.claims.role))
    }
}

fn map_decode_error(err: &jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        JwtErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        JwtErrorKind::InvalidToken
        | JwtErrorKind::Base64(_)
        | JwtErrorKind::Json(_)
        | JwtErrorKind::Utf8(_)
        | JwtErrorKind::MissingRequiredClaim(_) => AuthError::MalformedToken(err.to_string()),
        _ => AuthError::InvalidToken,
    }
}
