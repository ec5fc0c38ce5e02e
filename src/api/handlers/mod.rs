//! Route handlers, one module per resource.

pub mod comments;
pub mod projects;
pub mod tasks;

use axum::http::{HeaderName, header};

/// `Location` header pointing at a newly created resource.
fn location(collection: &str, id: impl std::fmt::Display) -> [(HeaderName, String); 1] {
    [(header::LOCATION, format!("{collection}/{id}"))]
}
