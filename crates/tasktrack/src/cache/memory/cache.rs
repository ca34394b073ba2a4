//! In-memory cache implementation with LRU eviction.
//!
//! Mirrors the Redis backend's key tracking: keys in a tracked namespace
//! (`tasksByStatus`) are remembered in a per-namespace set, so deleting the
//! namespace pattern touches only those keys. A key is always tracked before
//! its value can be read.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use tasktrack_core::cache::{
    is_tracked_key, pattern_matches, tracked_namespace_of_pattern, Cache, Result,
};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

/// In-memory cache with LRU eviction and lazy TTL expiry.
///
/// Expired entries are dropped the next time they are read. When
/// `max_entries` is reached the least recently used entry is evicted.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    /// Maps tracked namespace -> live keys in that namespace.
    tracking: Arc<RwLock<HashMap<&'static str, HashSet<String>>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` entries.
    /// A capacity of zero is raised to one.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            tracking: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of entries currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

fn untrack(
    tracking: &mut HashMap<&'static str, HashSet<String>>,
    namespace: &'static str,
    keys: &[String],
) {
    if let Some(tracked) = tracking.get_mut(namespace) {
        for key in keys {
            tracked.remove(key);
        }
        if tracked.is_empty() {
            tracking.remove(namespace);
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // `LruCache::get` updates recency, so a write lock is required.
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                store.pop(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        // Lock order is tracking, then store. A tracked key is registered
        // before its value becomes readable and the tracking lock is held
        // until the value is in place.
        let _tracking = match is_tracked_key(key) {
            Some(namespace) => {
                let mut tracking = self.tracking.write().await;
                tracking
                    .entry(namespace)
                    .or_default()
                    .insert(key.to_string());
                Some(tracking)
            }
            None => None,
        };

        let mut store = self.store.write().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let _tracking = match is_tracked_key(key) {
            Some(namespace) => {
                let mut tracking = self.tracking.write().await;
                untrack(&mut tracking, namespace, &[key.to_string()]);
                Some(tracking)
            }
            None => None,
        };

        let mut store = self.store.write().await;
        store.pop(key);

        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let Some(namespace) = tracked_namespace_of_pattern(pattern) else {
            // Untracked pattern: scan every key.
            let mut store = self.store.write().await;
            let keys_to_delete: Vec<String> = store
                .iter()
                .filter(|(key, _)| pattern_matches(pattern, key))
                .map(|(key, _)| key.clone())
                .collect();
            for key in keys_to_delete {
                store.pop(&key);
            }
            return Ok(());
        };

        // Held for the whole deletion so no concurrent `set` can slip a key
        // in between the read of the tracking set and the store eviction.
        let mut tracking = self.tracking.write().await;
        let keys_to_delete: Vec<String> = tracking
            .get(namespace)
            .map(|keys| {
                keys.iter()
                    .filter(|k| pattern_matches(pattern, k))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if keys_to_delete.is_empty() {
            return Ok(());
        }

        {
            let mut store = self.store.write().await;
            for key in &keys_to_delete {
                store.pop(key);
            }
        }
        untrack(&mut tracking, namespace, &keys_to_delete);

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasktrack_core::cache::{task_key, tasks_by_status_key, tasks_by_status_pattern};
    use tasktrack_core::task::TaskStatus;

    const TEST_MAX_ENTRIES: usize = 1000;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("task:1", b"payload", None).await.unwrap();

        assert_eq!(
            cache.get("task:1").await.unwrap(),
            Some(b"payload".to_vec())
        );
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        assert_eq!(cache.get("task:404").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("task:1", b"payload", None).await.unwrap();
        cache.delete("task:1").await.unwrap();

        assert!(cache.get("task:1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ttl_expiration_drops_entry() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache
            .set("task:1", b"short-lived", Some(Duration::from_millis(50)))
            .await
            .unwrap();
        assert!(cache.get("task:1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get("task:1").await.unwrap().is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_no_ttl_never_expires() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("task:1", b"persistent", None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(cache.get("task:1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_overwrite_value() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("task:1", b"first", None).await.unwrap();
        cache.set("task:1", b"second", None).await.unwrap();

        assert_eq!(cache.get("task:1").await.unwrap(), Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn test_delete_status_pattern_uses_tracking() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let todo = tasks_by_status_key(TaskStatus::Todo);
        let done = tasks_by_status_key(TaskStatus::Completed);

        cache.set(&todo, b"[]", None).await.unwrap();
        cache.set(&done, b"[]", None).await.unwrap();
        cache.set(&task_key(1), b"{}", None).await.unwrap();

        {
            let tracking = cache.tracking.read().await;
            let keys = tracking.get("tasksByStatus").unwrap();
            assert!(keys.contains(&todo));
            assert!(keys.contains(&done));
            assert!(!keys.contains(&task_key(1)));
        }

        cache
            .delete_pattern(&tasks_by_status_pattern())
            .await
            .unwrap();

        assert!(cache.get(&todo).await.unwrap().is_none());
        assert!(cache.get(&done).await.unwrap().is_none());
        assert!(cache.get(&task_key(1)).await.unwrap().is_some());
        assert!(cache.tracking.read().await.get("tasksByStatus").is_none());
    }

    #[tokio::test]
    async fn test_delete_narrow_status_pattern() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let in_progress = tasks_by_status_key(TaskStatus::InProgress);
        let todo = tasks_by_status_key(TaskStatus::Todo);

        cache.set(&in_progress, b"[]", None).await.unwrap();
        cache.set(&todo, b"[]", None).await.unwrap();

        cache.delete_pattern("tasksByStatus:IN_*").await.unwrap();

        assert!(cache.get(&in_progress).await.unwrap().is_none());
        assert!(cache.get(&todo).await.unwrap().is_some());
        let tracking = cache.tracking.read().await;
        assert_eq!(tracking.get("tasksByStatus").map(|k| k.len()), Some(1));
    }

    #[tokio::test]
    async fn test_delete_tracked_key_removes_from_tracking() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let todo = tasks_by_status_key(TaskStatus::Todo);

        cache.set(&todo, b"[]", None).await.unwrap();
        cache.delete(&todo).await.unwrap();

        assert!(cache.tracking.read().await.get("tasksByStatus").is_none());
    }

    #[tokio::test]
    async fn test_delete_untracked_pattern_falls_back_to_scan() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set(&task_key(1), b"1", None).await.unwrap();
        cache.set(&task_key(2), b"2", None).await.unwrap();
        cache
            .set(&tasks_by_status_key(TaskStatus::Todo), b"[]", None)
            .await
            .unwrap();

        cache.delete_pattern("task:*").await.unwrap();

        assert!(cache.get(&task_key(1)).await.unwrap().is_none());
        assert!(cache.get(&task_key(2)).await.unwrap().is_none());
        assert!(cache
            .get(&tasks_by_status_key(TaskStatus::Todo))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_delete_pattern_no_matches() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set(&task_key(1), b"1", None).await.unwrap();
        cache
            .delete_pattern(&tasks_by_status_pattern())
            .await
            .unwrap();

        assert!(cache.get(&task_key(1)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let cache = MemoryCache::new(3);

        cache.set("task:1", b"1", None).await.unwrap();
        cache.set("task:2", b"2", None).await.unwrap();
        cache.set("task:3", b"3", None).await.unwrap();

        // Touch task:1 so task:2 becomes least recently used.
        cache.get("task:1").await.unwrap();

        cache.set("task:4", b"4", None).await.unwrap();

        assert!(cache.get("task:1").await.unwrap().is_some());
        assert!(cache.get("task:2").await.unwrap().is_none());
        assert!(cache.get("task:3").await.unwrap().is_some());
        assert!(cache.get("task:4").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_is_raised_to_one() {
        let cache = MemoryCache::new(0);

        cache.set("task:1", b"1", None).await.unwrap();
        cache.set("task:2", b"2", None).await.unwrap();

        assert!(cache.get("task:1").await.unwrap().is_none());
        assert!(cache.get("task:2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_tracked_key_is_registered_before_it_is_readable() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let todo = tasks_by_status_key(TaskStatus::Todo);

        // Hold the tracking lock: a concurrent `set` must not publish its
        // value until it has registered the key.
        let tracking = cache.tracking.write().await;
        let writer = {
            let cache = cache.clone();
            let todo = todo.clone();
            tokio::spawn(async move { cache.set(&todo, b"[]", None).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get(&todo).await.unwrap().is_none());
        drop(tracking);

        writer.await.unwrap().unwrap();
        assert!(cache.tracking.read().await["tasksByStatus"].contains(&todo));
        assert!(cache.get(&todo).await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_visible_status_list_never_survives_delete_pattern() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let todo = tasks_by_status_key(TaskStatus::Todo);
        let pattern = tasks_by_status_pattern();

        for _ in 0..500 {
            let writer = {
                let cache = cache.clone();
                let todo = todo.clone();
                tokio::spawn(async move { cache.set(&todo, b"[]", None).await })
            };

            while cache.get(&todo).await.unwrap().is_none() {
                tokio::task::yield_now().await;
            }
            cache.delete_pattern(&pattern).await.unwrap();

            assert!(cache.get(&todo).await.unwrap().is_none());
            writer.await.unwrap().unwrap();
        }
    }

    #[tokio::test]
    async fn test_ping() {
        assert!(MemoryCache::new(1).ping().await.is_ok());
    }
}
