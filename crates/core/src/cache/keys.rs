use crate::task::{TaskId, TaskStatus};

/// Namespace of single-task entries.
pub const TASK_NAMESPACE: &str = "task";

/// Namespace of per-status task lists. Evicted as a whole on every write.
pub const TASKS_BY_STATUS_NAMESPACE: &str = "tasksByStatus";

/// Namespaces whose keys are tracked in a companion set so pattern deletion
/// never has to scan the keyspace.
const TRACKED_NAMESPACES: [&str; 1] = [TASKS_BY_STATUS_NAMESPACE];

const TRACKING_SUFFIX: &str = "_keys";

/// Returns the cache key for a single task.
pub fn task_key(id: TaskId) -> String {
    format!("{}:{}", TASK_NAMESPACE, id)
}

/// Returns the cache key for the list of tasks with the given status.
pub fn tasks_by_status_key(status: TaskStatus) -> String {
    format!("{}:{}", TASKS_BY_STATUS_NAMESPACE, status.as_str())
}

/// Returns the pattern matching every per-status list.
pub fn tasks_by_status_pattern() -> String {
    format!("{}:*", TASKS_BY_STATUS_NAMESPACE)
}

/// Returns the key of the set holding every live key of a tracked namespace.
pub fn tracking_key(namespace: &str) -> String {
    format!("{}:{}", namespace, TRACKING_SUFFIX)
}

/// Returns the namespace of a key: everything before the first `:`.
///
/// # Examples
///
/// ```
/// use tasktrack_core::cache::namespace_of;
///
/// assert_eq!(namespace_of("task:42"), "task");
/// assert_eq!(namespace_of("tasksByStatus:TODO"), "tasksByStatus");
/// assert_eq!(namespace_of("bare"), "bare");
/// ```
pub fn namespace_of(key: &str) -> &str {
    key.split(':').next().unwrap_or(key)
}

/// Returns the tracked namespace a key belongs to, if any.
///
/// The tracking set itself is never reported as a tracked key.
pub fn is_tracked_key(key: &str) -> Option<&'static str> {
    let namespace = namespace_of(key);
    if key == tracking_key(namespace) {
        return None;
    }
    TRACKED_NAMESPACES
        .into_iter()
        .find(|tracked| *tracked == namespace && key.len() > tracked.len())
}

/// Returns the tracked namespace a pattern is confined to, if any.
///
/// A pattern with a wildcard inside its namespace segment could span several
/// namespaces and is therefore never confined.
///
/// # Examples
///
/// ```
/// use tasktrack_core::cache::tracked_namespace_of_pattern;
///
/// assert_eq!(tracked_namespace_of_pattern("tasksByStatus:*"), Some("tasksByStatus"));
/// assert_eq!(tracked_namespace_of_pattern("task:*"), None);
/// assert_eq!(tracked_namespace_of_pattern("tasks*:*"), None);
/// ```
pub fn tracked_namespace_of_pattern(pattern: &str) -> Option<&'static str> {
    let (namespace, _) = pattern.split_once(':')?;
    if namespace.contains('*') {
        return None;
    }
    TRACKED_NAMESPACES
        .into_iter()
        .find(|tracked| *tracked == namespace)
}
