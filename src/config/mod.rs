//! Process configuration loaded once at startup.
//!
//! Values are layered: compiled defaults, then `TASKGATE_*` environment
//! variables, then [`ConfigOverrides`] supplied by the command line. Loading
//! reads variables through a lookup function so tests never touch the process
//! environment.

use crate::auth::adapters::{DEFAULT_ISSUER, DEFAULT_TOKEN_TTL_SECS, JwtConfig, JwtConfigError};
use chrono::TimeDelta;
use secrecy::SecretString;
use std::fmt;
use std::net::SocketAddr;
use thiserror::Error;

/// Listen address variable.
pub const BIND_VAR: &str = "TASKGATE_BIND";
/// Token signing secret variable.
pub const JWT_SECRET_VAR: &str = "TASKGATE_JWT_SECRET";
/// Token issuer variable.
pub const JWT_ISSUER_VAR: &str = "TASKGATE_JWT_ISSUER";
/// Token lifetime variable, in seconds.
pub const TOKEN_TTL_VAR: &str = "TASKGATE_TOKEN_TTL_SECS";
/// Database URL variable. Absent means in-memory storage.
pub const DATABASE_URL_VAR: &str = "TASKGATE_DATABASE_URL";
/// Connection pool size variable.
pub const DATABASE_POOL_SIZE_VAR: &str = "TASKGATE_DATABASE_POOL_SIZE";
/// Log filter variable, in `EnvFilter` syntax.
pub const LOG_VAR: &str = "TASKGATE_LOG";
/// Fallback log filter variable.
pub const RUST_LOG_VAR: &str = "RUST_LOG";
/// Log format variable: `compact` or `json`.
pub const LOG_FORMAT_VAR: &str = "TASKGATE_LOG_FORMAT";

/// Listen address used when none is configured.
pub const DEFAULT_BIND: &str = "127.0.0.1:8888";
/// Connection pool size used when none is configured.
pub const DEFAULT_POOL_SIZE: u32 = 8;
/// Log filter used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("{var} is invalid: {reason}")]
    Invalid {
        /// Offending variable.
        var: &'static str,
        /// Parse failure.
        reason: String,
    },

    /// The token settings were rejected.
    #[error("{var} is invalid: {source}")]
    Jwt {
        /// Variable holding the rejected setting.
        var: &'static str,
        /// Validation failure.
        #[source]
        source: JwtConfigError,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl fmt::Display) -> Self {
        Self::Invalid {
            var,
            reason: reason.to_string(),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Single-line human-readable events.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl TryFrom<&str> for LogFormat {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}', expected compact or json")),
        }
    }
}

/// Storage backend selection.
#[derive(Debug)]
pub enum StorageConfig {
    /// Process-local maps; data is lost on exit.
    InMemory,
    /// `PostgreSQL` through a Diesel connection pool.
    Postgres {
        /// Connection URL; may embed credentials.
        url: SecretString,
        /// Maximum pooled connections.
        pool_size: u32,
    },
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Listen address.
    pub bind: Option<SocketAddr>,
    /// Database URL.
    pub database_url: Option<String>,
    /// Log filter.
    pub log_filter: Option<String>,
    /// Log format.
    pub log_format: Option<LogFormat>,
}

/// Complete service configuration.
#[derive(Debug)]
pub struct ServerConfig {
    bind: SocketAddr,
    jwt: JwtConfig,
    storage: StorageConfig,
    log_filter: String,
    log_format: LogFormat,
}

impl ServerConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first variable that is missing or
    /// invalid.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), overrides)
    }

    /// Loads configuration through `lookup`, which returns a variable's value
    /// or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first variable that is missing or
    /// invalid.
    pub fn from_lookup<F>(lookup: F, overrides: ConfigOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let bind = match overrides.bind {
            Some(addr) => addr,
            None => read(BIND_VAR)
                .as_deref()
                .unwrap_or(DEFAULT_BIND)
                .parse::<SocketAddr>()
                .map_err(|err| ConfigError::invalid(BIND_VAR, err))?,
        };

        let jwt = load_jwt(&read)?;
        let storage = load_storage(&read, overrides.database_url)?;

        let log_filter = overrides
            .log_filter
            .or_else(|| read(LOG_VAR))
            .or_else(|| read(RUST_LOG_VAR))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        let log_format = match overrides.log_format {
            Some(format) => format,
            None => read(LOG_FORMAT_VAR)
                .map(|value| LogFormat::try_from(value.as_str()))
                .transpose()
                .map_err(|reason| ConfigError::invalid(LOG_FORMAT_VAR, reason))?
                .unwrap_or_default(),
        };

        Ok(Self {
            bind,
            jwt,
            storage,
            log_filter,
            log_format,
        })
    }

    /// Returns the listen address.
    #[must_use]
    pub const fn bind(&self) -> SocketAddr {
        self.bind
    }

    /// Returns the token settings.
    #[must_use]
    pub const fn jwt(&self) -> &JwtConfig {
        &self.jwt
    }

    /// Returns the storage backend selection.
    #[must_use]
    pub const fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Returns the log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

fn load_jwt(read: &impl Fn(&str) -> Option<String>) -> Result<JwtConfig, ConfigError> {
    let secret = read(JWT_SECRET_VAR).ok_or(ConfigError::Missing(JWT_SECRET_VAR))?;
    let issuer = read(JWT_ISSUER_VAR).unwrap_or_else(|| DEFAULT_ISSUER.to_owned());
    let ttl_secs = read(TOKEN_TTL_VAR)
        .map(|value| value.parse::<i64>())
        .transpose()
        .map_err(|err| ConfigError::invalid(TOKEN_TTL_VAR, err))?
        .unwrap_or(DEFAULT_TOKEN_TTL_SECS);
    let ttl = TimeDelta::try_seconds(ttl_secs)
        .ok_or_else(|| ConfigError::invalid(TOKEN_TTL_VAR, "out of range"))?;

    let config = JwtConfig::new(SecretString::from(secret), issuer).map_err(|source| {
        let var = match source {
            JwtConfigError::EmptyIssuer => JWT_ISSUER_VAR,
            JwtConfigError::SecretTooShort { .. } | JwtConfigError::NonPositiveTtl(_) => {
                JWT_SECRET_VAR
            }
        };
        ConfigError::Jwt { var, source }
    })?;
    config
        .with_token_ttl(ttl)
        .map_err(|source| ConfigError::Jwt {
            var: TOKEN_TTL_VAR,
            source,
        })
}

fn load_storage(
    read: &impl Fn(&str) -> Option<String>,
    url_override: Option<String>,
) -> Result<StorageConfig, ConfigError> {
    let Some(url) = url_override.or_else(|| read(DATABASE_URL_VAR)) else {
        return Ok(StorageConfig::InMemory);
    };
    let pool_size = read(DATABASE_POOL_SIZE_VAR)
        .map(|value| value.parse::<u32>())
        .transpose()
        .map_err(|err| ConfigError::invalid(DATABASE_POOL_SIZE_VAR, err))?
        .unwrap_or(DEFAULT_POOL_SIZE);
    if pool_size == 0 {
        return Err(ConfigError::invalid(
            DATABASE_POOL_SIZE_VAR,
            "pool size must be at least 1",
        ));
    }
    Ok(StorageConfig::Postgres {
        url: SecretString::from(url),
        pool_size,
    })
}
