//! Pure functions for turning tasks into cache bytes and back.
//!
//! Values are stored as JSON so they stay readable with `redis-cli`.

use thiserror::Error;

use crate::task::Task;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

impl From<SerializationError> for super::CacheError {
    fn from(err: SerializationError) -> Self {
        super::CacheError::Serialization(err.to_string())
    }
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a task to JSON bytes.
pub fn serialize_task(task: &Task) -> Result<Vec<u8>> {
    serde_json::to_vec(task).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a task.
pub fn deserialize_task(bytes: &[u8]) -> Result<Task> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes an ordered list of tasks to JSON bytes.
pub fn serialize_tasks(tasks: &[Task]) -> Result<Vec<u8>> {
    serde_json::to_vec(tasks).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an ordered list of tasks.
pub fn deserialize_tasks(bytes: &[u8]) -> Result<Vec<Task>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
