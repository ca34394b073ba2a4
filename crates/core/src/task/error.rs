use thiserror::Error;

use crate::storage::RepositoryError;

use super::TaskId;

/// Errors produced when a task payload fails boundary validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleBlank,
    #[error("Title must be between 3 and 200 characters")]
    TitleLength,
    #[error("Description must not exceed 1000 characters")]
    DescriptionTooLong,
}

/// Errors surfaced by the task service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task not found with id: {id}")]
    NotFound { id: TaskId },
    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<RepositoryError> for TaskError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { id, .. } => match id.parse() {
                Ok(id) => TaskError::NotFound { id },
                Err(_) => TaskError::Unavailable(format!("Task not found: {id}")),
            },
            other => TaskError::Unavailable(other.to_string()),
        }
    }
}
