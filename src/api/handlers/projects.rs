//! Project routes.

use super::location;
use crate::api::{
    dto::{ProjectPayload, ProjectView},
    error::ApiError,
    extract::{JsonBody, PathId},
    state::AppState,
};
use crate::auth::domain::Identity;
use crate::task::domain::ProjectId;
use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderName, StatusCode},
};

const COLLECTION: &str = "/api/projects";

/// `GET /api/projects`
///
/// # Errors
///
/// Returns [`ApiError`] when storage fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProjectView>>, ApiError> {
    let projects = state.projects().list().await?;
    Ok(Json(projects.iter().map(ProjectView::from).collect()))
}

/// `GET /api/projects/:id`
///
/// # Errors
///
/// Returns a 404 [`ApiError`] when the project does not exist.
pub async fn get(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ProjectView>, ApiError> {
    let project = state.projects().find(ProjectId::from_uuid(id)).await?;
    Ok(Json(ProjectView::from(&project)))
}

/// `POST /api/projects`. The caller becomes the owner.
///
/// # Errors
///
/// Returns [`ApiError`] unless the caller is an admin, or for a blank name.
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    JsonBody(payload): JsonBody<ProjectPayload>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<ProjectView>), ApiError> {
    let project = state
        .projects()
        .create(&caller, payload.name, payload.description)
        .await?;
    Ok((
        StatusCode::CREATED,
        location(COLLECTION, project.id()),
        Json(ProjectView::from(&project)),
    ))
}
