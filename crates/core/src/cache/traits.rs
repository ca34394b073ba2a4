use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for key/value cache backends.
///
/// Values are opaque bytes; see [`super::serialize_task`] for the encoding
/// used by the task service.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key. Expired entries read as `None`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes all values matching a glob pattern (e.g. `"tasksByStatus:*"`).
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<()>;
}
