//! Request extractors and the authentication middleware.

use super::{error::ApiError, state::AppState};
use crate::auth::domain::AuthError;
use crate::error::ErrorKind;
use async_trait::async_trait;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, State, rejection::JsonRejection},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// JSON body whose rejections surface as `InvalidArgument`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| ApiError::new(ErrorKind::InvalidArgument, rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// UUID path segment whose rejections surface as `InvalidArgument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::new(ErrorKind::InvalidArgument, rejection.body_text()))?;
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|err| {
                ApiError::new(
                    ErrorKind::InvalidArgument,
                    format!("invalid id '{raw}': {err}"),
                )
            })
    }
}

/// Authentication stage for protected routes.
///
/// Verifies the `Authorization` header through the gate and stores the
/// resulting [`Identity`](crate::auth::domain::Identity) in the request
/// extensions. Rejected requests never reach the handler.
///
/// # Errors
///
/// Returns a 401 [`ApiError`] carrying the gate's rejection kind.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MissingCredential))
        .transpose()?;
    let identity = state.gate().authenticate(credential)?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
