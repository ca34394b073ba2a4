mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    is_tracked_key, namespace_of, task_key, tasks_by_status_key, tasks_by_status_pattern,
    tracked_namespace_of_pattern, tracking_key, TASKS_BY_STATUS_NAMESPACE, TASK_NAMESPACE,
};
pub use patterns::pattern_matches;
pub use serialization::{
    deserialize_task, deserialize_tasks, serialize_task, serialize_tasks, SerializationError,
};
pub use traits::Cache;
