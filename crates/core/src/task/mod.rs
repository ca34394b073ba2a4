mod error;
mod http_mapping;
mod requests;
mod types;
mod validation;

pub use error::{TaskError, ValidationError};
pub use http_mapping::task_error_to_status_code;
pub use requests::TaskInput;
pub use types::{NewTask, ParseEnumError, Task, TaskId, TaskPriority, TaskStatus};
pub use validation::{
    validate_task_input, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
