use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use tasktrack_core::api::ApiResponse;
use tasktrack_core::storage::{repository_error_to_status_code, RepositoryError};
use tasktrack_core::task::{task_error_to_status_code, TaskError, ValidationError};

/// Request-shape problems caught before the service is invoked.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Malformed request body: {0}")]
    Body(String),
    #[error("Invalid path parameter: {0}")]
    Path(String),
    #[error("Invalid query parameter: {0}")]
    Query(String),
}

/// Handler error rendered as the error envelope.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(err) = self.0.downcast_ref::<TaskError>() {
            task_error_to_status_code(err)
        } else if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(err)
        } else if self.0.is::<ValidationError>() || self.0.is::<RequestError>() {
            400
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Request failed");
        } else {
            tracing::warn!(status = %status, message = %message, "API error");
        }

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
