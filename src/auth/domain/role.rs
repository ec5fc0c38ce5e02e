//! Role claim carried by authentication tokens.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted to an authenticated subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular member: may comment and work on owned tasks.
    #[serde(alias = "ROLE_USER")]
    User,
    /// Project administrator: may create projects and manage their tasks.
    #[serde(alias = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Returns the canonical claim representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Returns `true` when this role meets `required`.
    ///
    /// `Admin` includes every `User` permission.
    #[must_use]
    pub const fn satisfies(self, required: Self) -> bool {
        matches!(
            (self, required),
            (Self::Admin, _) | (Self::User, Self::User)
        )
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        let bare = normalized.strip_prefix("ROLE_").unwrap_or(normalized.as_str());
        match bare {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
