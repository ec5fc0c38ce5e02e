//! Comment routes.

use super::location;
use crate::api::{
    dto::{CommentPayload, CommentView},
    error::ApiError,
    extract::{JsonBody, PathId},
    state::AppState,
};
use crate::auth::domain::Identity;
use crate::task::{domain::CommentId, services::Operation};
use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderName, StatusCode},
};

const COLLECTION: &str = "/api/comments";

/// `POST /api/comments`
///
/// # Errors
///
/// Returns [`ApiError`] for blank text, a missing task or a closed task (404).
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    JsonBody(payload): JsonBody<CommentPayload>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<CommentView>), ApiError> {
    let comment = state
        .workflow()
        .add_comment(&caller, payload.task_id, payload.text)
        .await
        .map_err(ApiError::workflow(Operation::CreateComment))?;
    Ok((
        StatusCode::CREATED,
        location(COLLECTION, comment.id()),
        Json(CommentView::from(&comment)),
    ))
}

/// `GET /api/comments/:id`
///
/// # Errors
///
/// Returns a 404 [`ApiError`] when the comment does not exist.
pub async fn get(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<CommentView>, ApiError> {
    let comment = state
        .workflow()
        .find_comment(CommentId::from_uuid(id))
        .await
        .map_err(ApiError::workflow(Operation::GetComment))?;
    Ok(Json(CommentView::from(&comment)))
}
