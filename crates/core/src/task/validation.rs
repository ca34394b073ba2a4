use super::{TaskInput, ValidationError};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Validates a task payload before it reaches the service.
///
/// Lengths are counted in characters, not bytes.
pub fn validate_task_input(input: &TaskInput) -> Result<(), ValidationError> {
    if input.title.trim().is_empty() {
        return Err(ValidationError::TitleBlank);
    }

    let title_len = input.title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_len) {
        return Err(ValidationError::TitleLength);
    }

    if let Some(description) = &input.description {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(ValidationError::DescriptionTooLong);
        }
    }

    Ok(())
}
