//! Stateless bearer-token authentication.
//!
//! Every protected request is verified independently from its credential
//! header; no session state is kept between requests. The module follows the
//! same hexagonal layout as [`crate::task`]:
//!
//! - Identity and role values in [`domain`]
//! - The token verification contract in [`ports`]
//! - The HS256 JWT codec in [`adapters`]
//! - The request gate in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
