//! Redis cache implementation.
//!
//! Keys in a tracked namespace (`tasksByStatus`) are also added to a Redis
//! set (`tasksByStatus:_keys`), so deleting the namespace pattern reads that
//! set instead of scanning the keyspace. Patterns outside a tracked namespace
//! fall back to `SCAN MATCH`.
//!
//! None of the multi-command operations are atomic, so they are ordered to
//! fail safe: `set` adds the key to its tracking set before writing the
//! value, and `delete` removes the value before untracking the key. A failure
//! between commands can only leave a tracked key with no value, which the
//! next pattern deletion cleans up since `DEL` on a missing key is a no-op.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use tasktrack_core::cache::{
    is_tracked_key, pattern_matches, tracked_namespace_of_pattern, tracking_key, Cache, Result,
};

use super::error::map_redis_error;

const SCAN_BATCH: usize = 100;

/// Redis cache backend using a connection manager for reconnects.
///
/// Every key is stored under an optional prefix so several deployments (or
/// test runs) can share one Redis database.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
    prefix: String,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        Self::with_prefix(url, "").await
    }

    /// Creates a new Redis cache connection that namespaces every key with
    /// `prefix`.
    pub async fn with_prefix(url: &str, prefix: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self {
            conn,
            prefix: prefix.into(),
        })
    }

    fn physical(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    async fn scan_and_delete(&self, pattern: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let physical_pattern = self.physical(pattern);
        let mut cursor: u64 = 0;

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&physical_pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(map_redis_error)?;

            if !keys.is_empty() {
                conn.del::<_, ()>(&keys).await.map_err(map_redis_error)?;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn
            .get(self.physical(key))
            .await
            .map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();
        let physical_key = self.physical(key);

        if let Some(namespace) = is_tracked_key(key) {
            conn.sadd::<_, _, ()>(self.physical(&tracking_key(namespace)), key)
                .await
                .map_err(map_redis_error)?;
        }

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(&physical_key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(&physical_key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(self.physical(key))
            .await
            .map_err(map_redis_error)?;

        if let Some(namespace) = is_tracked_key(key) {
            conn.srem::<_, _, ()>(self.physical(&tracking_key(namespace)), key)
                .await
                .map_err(map_redis_error)?;
        }

        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let Some(namespace) = tracked_namespace_of_pattern(pattern) else {
            return self.scan_and_delete(pattern).await;
        };

        let mut conn = self.conn.clone();
        let tracking = self.physical(&tracking_key(namespace));

        let tracked_keys: Vec<String> = conn.smembers(&tracking).await.map_err(map_redis_error)?;

        let keys_to_delete: Vec<&String> = tracked_keys
            .iter()
            .filter(|k| pattern_matches(pattern, k))
            .collect();

        if keys_to_delete.is_empty() {
            return Ok(());
        }

        let physical_keys: Vec<String> = keys_to_delete.iter().map(|k| self.physical(k)).collect();
        conn.del::<_, ()>(&physical_keys)
            .await
            .map_err(map_redis_error)?;
        conn.srem::<_, _, ()>(&tracking, &keys_to_delete)
            .await
            .map_err(map_redis_error)?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasktrack_core::cache::{task_key, tasks_by_status_key, tasks_by_status_pattern};
    use tasktrack_core::task::TaskStatus;
    use uuid::Uuid;

    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Returns a cache isolated under a random prefix, or `None` if Redis is
    /// not reachable.
    async fn get_test_cache() -> Option<RedisCache> {
        let prefix = format!("test:{}:", Uuid::new_v4());
        let cache = RedisCache::with_prefix(&redis_url(), prefix).await.ok()?;
        cache.ping().await.ok()?;
        Some(cache)
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = task_key(1);
        cache.set(&key, b"hello world", None).await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some(b"hello world".to_vec()));

        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        assert_eq!(cache.get(&task_key(404)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_delete() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = task_key(2);
        cache.set(&key, b"to be deleted", None).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        cache.delete(&key).await.unwrap();

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = task_key(3);
        cache
            .set(&key, b"expiring", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_delete_status_pattern_uses_tracking_set() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let todo = tasks_by_status_key(TaskStatus::Todo);
        let done = tasks_by_status_key(TaskStatus::Completed);
        let single = task_key(1);

        cache.set(&todo, b"[]", None).await.unwrap();
        cache.set(&done, b"[]", None).await.unwrap();
        cache.set(&single, b"{}", None).await.unwrap();

        let mut conn = cache.conn.clone();
        let tracking = cache.physical("tasksByStatus:_keys");
        let tracked: Vec<String> = conn.smembers(&tracking).await.unwrap();
        assert!(tracked.contains(&todo));
        assert!(tracked.contains(&done));
        assert!(!tracked.contains(&single));

        cache
            .delete_pattern(&tasks_by_status_pattern())
            .await
            .unwrap();

        assert!(cache.get(&todo).await.unwrap().is_none());
        assert!(cache.get(&done).await.unwrap().is_none());
        assert!(cache.get(&single).await.unwrap().is_some());
        let tracked_after: Vec<String> = conn.smembers(&tracking).await.unwrap();
        assert!(tracked_after.is_empty());

        cache.delete(&single).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_delete_tracked_key_removes_from_tracking() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let todo = tasks_by_status_key(TaskStatus::Todo);
        cache.set(&todo, b"[]", None).await.unwrap();
        cache.delete(&todo).await.unwrap();

        let mut conn = cache.conn.clone();
        let tracked: Vec<String> = conn
            .smembers(cache.physical("tasksByStatus:_keys"))
            .await
            .unwrap();
        assert!(!tracked.contains(&todo));
    }

    #[tokio::test]
    async fn test_redis_untracked_pattern_scans() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        cache.set(&task_key(1), b"1", None).await.unwrap();
        cache.set(&task_key(2), b"2", None).await.unwrap();
        let todo = tasks_by_status_key(TaskStatus::Todo);
        cache.set(&todo, b"[]", None).await.unwrap();

        cache.delete_pattern("task:*").await.unwrap();

        assert!(cache.get(&task_key(1)).await.unwrap().is_none());
        assert!(cache.get(&task_key(2)).await.unwrap().is_none());
        assert!(cache.get(&todo).await.unwrap().is_some());

        cache
            .delete_pattern(&tasks_by_status_pattern())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_redis_failed_tracking_leaves_no_value_behind() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        // A string under the tracking key makes every SADD fail with WRONGTYPE.
        let mut conn = cache.conn.clone();
        let tracking = cache.physical("tasksByStatus:_keys");
        conn.set::<_, _, ()>(&tracking, "not a set").await.unwrap();

        let todo = tasks_by_status_key(TaskStatus::Todo);
        assert!(cache.set(&todo, b"[]", None).await.is_err());
        assert!(cache.get(&todo).await.unwrap().is_none());

        conn.del::<_, ()>(&tracking).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_expiring_status_list_is_tracked_and_evicted() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let todo = tasks_by_status_key(TaskStatus::Todo);
        cache
            .set(&todo, b"[]", Some(Duration::from_secs(60)))
            .await
            .unwrap();

        let mut conn = cache.conn.clone();
        let tracked: Vec<String> = conn
            .smembers(cache.physical("tasksByStatus:_keys"))
            .await
            .unwrap();
        assert!(tracked.contains(&todo));

        cache
            .delete_pattern(&tasks_by_status_pattern())
            .await
            .unwrap();

        assert!(cache.get(&todo).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_binary_data() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = task_key(9);
        let value: Vec<u8> = (0..=255).collect();

        cache.set(&key, &value, None).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(value));

        cache.delete(&key).await.unwrap();
    }
}
