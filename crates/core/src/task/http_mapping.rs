use super::TaskError;

/// Maps a [`TaskError`] to an HTTP status code.
///
/// # Examples
///
/// ```
/// use tasktrack_core::task::{TaskError, ValidationError, task_error_to_status_code};
///
/// assert_eq!(task_error_to_status_code(&TaskError::NotFound { id: 1 }), 404);
/// assert_eq!(task_error_to_status_code(&ValidationError::TitleBlank.into()), 400);
/// ```
pub fn task_error_to_status_code(error: &TaskError) -> u16 {
    match error {
        TaskError::NotFound { .. } => 404,
        TaskError::ValidationFailed(_) => 400,
        TaskError::Unavailable(_) => 503,
    }
}
