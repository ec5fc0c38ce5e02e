//! Authenticated subject and identity value types.

use super::{AuthDomainError, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Username embedded in a token and recorded as owner or author on entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject(String);

impl Subject {
    /// Creates a validated subject.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError::EmptySubject`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, AuthDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthDomainError::EmptySubject);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the subject as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Subject {
    type Error = AuthDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Subject> for String {
    fn from(value: Subject) -> Self {
        value.0
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated caller derived from a verified token.
///
/// Identities are never persisted; one is built per request and passed by
/// reference to every downstream check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    subject: Subject,
    role: Role,
}

impl Identity {
    /// Creates an identity from a subject and role.
    #[must_use]
    pub const fn new(subject: Subject, role: Role) -> Self {
        Self { subject, role }
    }

    /// Returns the authenticated subject.
    #[must_use]
    pub const fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns the role claim.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` when the identity's role meets `required`.
    #[must_use]
    pub const fn has_role(&self, required: Role) -> bool {
        self.role.satisfies(required)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.subject, self.role)
    }
}
