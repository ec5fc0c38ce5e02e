//! JSON error responses.
//!
//! Every rejected request carries a `{kind, message}` body. The status is
//! derived from the [`ErrorKind`]; `InvalidState` additionally depends on the
//! route that raised it.

use crate::auth::domain::AuthError;
use crate::auth::services::BEARER_SCHEME;
use crate::error::ErrorKind;
use crate::task::services::{Operation, ProjectServiceError, TaskWorkflowError};
use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use tracing::error;

const INTERNAL_MESSAGE: &str = "internal server error";

/// Error returned by every handler and extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ErrorKind,
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: ErrorKind,
    message: &'a str,
}

impl ApiError {
    /// Creates an error with the default status for `kind`.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl fmt::Display) -> Self {
        Self::build(kind, default_status(kind), message)
    }

    /// Creates an error raised while serving `operation`.
    #[must_use]
    pub fn during(operation: Operation, kind: ErrorKind, message: impl fmt::Display) -> Self {
        let status = match kind {
            ErrorKind::InvalidState => invalid_state_status(operation),
            _ => default_status(kind),
        };
        Self::build(kind, status, message)
    }

    /// Returns a mapper from workflow errors raised by `operation`.
    #[must_use]
    pub fn workflow(operation: Operation) -> impl Fn(TaskWorkflowError) -> Self {
        move |err| Self::during(operation, err.kind(), err)
    }

    fn build(kind: ErrorKind, status: StatusCode, message: impl fmt::Display) -> Self {
        if kind == ErrorKind::Internal {
            error!(%message, "request failed");
            return Self {
                kind,
                status,
                message: INTERNAL_MESSAGE.to_owned(),
            };
        }
        Self {
            kind,
            status,
            message: message.to_string(),
        }
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::new(err.kind(), err)
    }
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        Self::new(err.kind(), err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            kind: self.kind,
            message: &self.message,
        };
        let mut response = (self.status, Json(body)).into_response();
        if self.kind.is_authentication_failure() {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BEARER_SCHEME),
            );
        }
        response
    }
}

const fn default_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::InvalidState | ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::MissingCredential
        | ErrorKind::InvalidToken
        | ErrorKind::ExpiredToken
        | ErrorKind::MalformedToken => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Closed-task rejections on update and comment routes read as "does not
/// exist or is closed".
const fn invalid_state_status(operation: Operation) -> StatusCode {
    match operation {
        Operation::UpdateTask | Operation::CreateComment => StatusCode::NOT_FOUND,
        _ => StatusCode::CONFLICT,
    }
}
