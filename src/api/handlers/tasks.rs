//! Task routes.

use super::location;
use crate::api::{
    dto::{TaskPayload, TaskQuery, TaskView},
    error::ApiError,
    extract::{JsonBody, PathId},
    state::AppState,
};
use crate::auth::domain::Identity;
use crate::task::{
    domain::{TaskId, TaskResolution, TaskState},
    services::Operation,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::{HeaderName, StatusCode},
};

const COLLECTION: &str = "/api/tasks";

/// `GET /api/tasks?owner=`
///
/// # Errors
///
/// Returns [`ApiError`] when storage fails.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<Vec<TaskView>>, ApiError> {
    let tasks = state
        .workflow()
        .list_tasks(query.owner.as_deref())
        .await
        .map_err(ApiError::workflow(Operation::ListTasks))?;
    Ok(Json(tasks.iter().map(TaskView::from).collect()))
}

/// `GET /api/tasks/:id`
///
/// # Errors
///
/// Returns a 404 [`ApiError`] when the task does not exist.
pub async fn get(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<TaskView>, ApiError> {
    let task = state
        .workflow()
        .find_task(TaskId::from_uuid(id))
        .await
        .map_err(ApiError::workflow(Operation::GetTask))?;
    Ok(Json(TaskView::from(&task)))
}

/// `POST /api/tasks`
///
/// # Errors
///
/// Returns [`ApiError`] on a failed role or project-ownership check or
/// invalid fields.
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    JsonBody(payload): JsonBody<TaskPayload>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<TaskView>), ApiError> {
    let task = state
        .workflow()
        .create_task(&caller, payload.into())
        .await
        .map_err(ApiError::workflow(Operation::CreateTask))?;
    Ok((
        StatusCode::CREATED,
        location(COLLECTION, task.id()),
        Json(TaskView::from(&task)),
    ))
}

/// `PUT /api/tasks/:id`
///
/// # Errors
///
/// Returns [`ApiError`] on a failed check; a closed task reads as 404.
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    PathId(id): PathId,
    JsonBody(payload): JsonBody<TaskPayload>,
) -> Result<Json<TaskView>, ApiError> {
    let task = state
        .workflow()
        .update_task(&caller, TaskId::from_uuid(id), payload.into())
        .await
        .map_err(ApiError::workflow(Operation::UpdateTask))?;
    Ok(Json(TaskView::from(&task)))
}

/// `DELETE /api/tasks/:id`
///
/// # Errors
///
/// Returns [`ApiError`] on a failed check or a missing task.
pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    PathId(id): PathId,
) -> Result<StatusCode, ApiError> {
    state
        .workflow()
        .remove_task(&caller, TaskId::from_uuid(id))
        .await
        .map_err(ApiError::workflow(Operation::DeleteTask))?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/tasks/:id/changeState` with a bare JSON string body.
///
/// # Errors
///
/// Returns [`ApiError`] on a failed check, a missing task or an unknown
/// state.
pub async fn change_state(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    PathId(id): PathId,
    JsonBody(new_state): JsonBody<TaskState>,
) -> Result<Json<TaskView>, ApiError> {
    let task = state
        .workflow()
        .change_state(&caller, TaskId::from_uuid(id), new_state)
        .await
        .map_err(ApiError::workflow(Operation::ChangeTaskState))?;
    Ok(Json(TaskView::from(&task)))
}

/// `POST /api/tasks/:id/changeResolution` with a bare JSON string body.
///
/// # Errors
///
/// Returns [`ApiError`] on a failed check or a closed task (409).
pub async fn change_resolution(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    PathId(id): PathId,
    JsonBody(resolution): JsonBody<TaskResolution>,
) -> Result<Json<TaskView>, ApiError> {
    let task = state
        .workflow()
        .change_resolution(&caller, TaskId::from_uuid(id), resolution)
        .await
        .map_err(ApiError::workflow(Operation::ChangeTaskResolution))?;
    Ok(Json(TaskView::from(&task)))
}

/// `POST /api/tasks/:id/changeProgress` with a bare JSON integer body.
///
/// # Errors
///
/// Returns [`ApiError`] for out-of-range values (400), a failed check or a
/// closed task (409).
pub async fn change_progress(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    PathId(id): PathId,
    JsonBody(progress): JsonBody<i64>,
) -> Result<Json<TaskView>, ApiError> {
    let task = state
        .workflow()
        .change_progress(&caller, TaskId::from_uuid(id), progress)
        .await
        .map_err(ApiError::workflow(Operation::ChangeTaskProgress))?;
    Ok(Json(TaskView::from(&task)))
}
