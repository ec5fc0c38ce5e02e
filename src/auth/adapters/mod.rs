//! Adapter implementations for authentication ports.

pub mod jwt;

pub use jwt::{
    DEFAULT_ISSUER, DEFAULT_TOKEN_TTL_SECS, JwtConfig, JwtConfigError, JwtTokenCodec,
    MIN_SECRET_LEN, TokenIssueError,
};
