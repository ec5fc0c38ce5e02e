//! Unit tests for the authentication module.
//!
//! Tests cover identity values, the JWT codec and the request gate.
