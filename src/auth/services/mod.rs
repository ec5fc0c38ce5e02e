//! Application services for request authentication.

mod gate;

pub use gate::{AuthenticationGate, BEARER_SCHEME, extract_bearer_token};
