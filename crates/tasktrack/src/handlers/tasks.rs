//! Task CRUD handlers.
//!
//! Handlers only translate HTTP into service calls: they decode and validate
//! the request, call the task service and wrap the result in the envelope.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use tasktrack_core::api::ApiResponse;
use tasktrack_core::task::{Task, TaskId, TaskInput, TaskStatus};

use crate::{
    handlers::{AppError, RequestError},
    state::AppState,
};

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Query parameters for title search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: String,
}

fn task_id(path: Result<Path<TaskId>, PathRejection>) -> Result<TaskId, AppError> {
    let Path(id) = path.map_err(|e| RequestError::Path(e.body_text()))?;
    Ok(id)
}

fn task_input(body: Result<Json<TaskInput>, JsonRejection>) -> Result<TaskInput, AppError> {
    let Json(input) = body.map_err(|e| RequestError::Body(e.body_text()))?;
    input.validate()?;
    Ok(input)
}

/// GET /v1/tasks
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Vec<Task>> {
    tracing::info!("GET /v1/tasks - Fetch all tasks");

    let tasks = state.tasks.list_tasks().await?;
    Ok(Json(ApiResponse::success(tasks, "Tasks retrieved successfully")))
}

/// GET /v1/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<Task> {
    let id = task_id(path)?;
    tracing::info!(task_id = id, "GET /v1/tasks/{{id}} - Fetch task");

    let task = state.tasks.get_task(id).await?;
    Ok(Json(ApiResponse::success(task, "Task retrieved successfully")))
}

/// GET /v1/tasks/status/{status}
pub async fn list_tasks_by_status(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Vec<Task>> {
    let Path(raw) = path.map_err(|e| RequestError::Path(e.body_text()))?;
    let status = raw
        .parse::<TaskStatus>()
        .map_err(|e| RequestError::Path(e.to_string()))?;
    tracing::info!(%status, "GET /v1/tasks/status/{{status}} - Fetch tasks by status");

    let tasks = state.tasks.list_tasks_by_status(status).await?;
    Ok(Json(ApiResponse::success(tasks, "Tasks retrieved by status")))
}

/// GET /v1/tasks/search?title=
pub async fn search_tasks(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<Task>> {
    let Query(query) = query.map_err(|e| RequestError::Query(e.body_text()))?;
    tracing::info!(title = %query.title, "GET /v1/tasks/search - Search tasks by title");

    let tasks = state.tasks.search_tasks(&query.title).await?;
    Ok(Json(ApiResponse::success(tasks, "Search results")))
}

/// GET /v1/tasks/count
pub async fn count_tasks(State(state): State<AppState>) -> ApiResult<u64> {
    tracing::info!("GET /v1/tasks/count - Count tasks");

    let count = state.tasks.count_tasks().await?;
    Ok(Json(ApiResponse::success(count, "Task count retrieved")))
}

/// POST /v1/tasks
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<TaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), AppError> {
    let input = task_input(body)?;
    tracing::info!(title = %input.title, "POST /v1/tasks - Create task");

    let task = state.tasks.create_task(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(task, "Task created successfully")),
    ))
}

/// PUT /v1/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
    body: Result<Json<TaskInput>, JsonRejection>,
) -> ApiResult<Task> {
    let id = task_id(path)?;
    let input = task_input(body)?;
    tracing::info!(task_id = id, "PUT /v1/tasks/{{id}} - Update task");

    let task = state.tasks.update_task(id, input).await?;
    Ok(Json(ApiResponse::success(task, "Task updated successfully")))
}

/// DELETE /v1/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<()> {
    let id = task_id(path)?;
    tracing::info!(task_id = id, "DELETE /v1/tasks/{{id}} - Delete task");

    state.tasks.delete_task(id).await?;
    Ok(Json(ApiResponse::empty("Task deleted successfully")))
}
