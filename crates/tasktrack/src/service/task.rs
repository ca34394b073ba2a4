//! Cache-aside orchestration over a `TaskRepository` and an optional `Cache`.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use tasktrack_core::cache::{
    deserialize_task, deserialize_tasks, serialize_task, serialize_tasks, task_key,
    tasks_by_status_key, tasks_by_status_pattern, Cache, CacheError,
};
use tasktrack_core::storage::{RepositoryError, TaskRepository};
use tasktrack_core::task::{Task, TaskError, TaskId, TaskInput, TaskStatus};

/// Immutable knobs of the task service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// TTL applied to every cache write.
    pub cache_ttl: Duration,
    /// Upper bound for a single cache call.
    pub cache_timeout: Duration,
    /// Upper bound for a single store call.
    pub store_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(600),
            cache_timeout: Duration::from_millis(250),
            store_timeout: Duration::from_millis(5000),
        }
    }
}

/// Task service.
///
/// One instance is shared by every request handler. Its only mutable state
/// is the status-list generation, bumped on every write before the status
/// lists are evicted. A reader only publishes a status list it loaded within
/// a single generation, so a list read before a write cannot be cached
/// after that write's eviction.
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    cache: Option<Arc<dyn Cache>>,
    settings: ServiceSettings,
    status_generation: AtomicU64,
}

impl TaskService {
    /// Creates a new task service.
    ///
    /// Passing `None` for `cache` sends every read to the store.
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        cache: Option<Arc<dyn Cache>>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            settings,
            status_generation: AtomicU64::new(0),
        }
    }

    /// Whether a cache backend is wired in.
    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Returns one task, serving it from the cache when possible.
    pub async fn get_task(&self, id: TaskId) -> Result<Task, TaskError> {
        let cache_key = task_key(id);

        if let Some(bytes) = self.cache_get(&cache_key).await {
            match deserialize_task(&bytes) {
                Ok(task) => {
                    tracing::trace!(task_id = id, "Cache hit for task");
                    return Ok(task);
                }
                Err(err) => {
                    tracing::warn!(task_id = id, error = %err, "Cached task deserialization failed")
                }
            }
        }

        tracing::trace!(task_id = id, "Cache miss for task");
        let task = self
            .store(self.repository.get_task(id))
            .await?
            .ok_or(TaskError::NotFound { id })?;

        self.cache_task(&task).await;

        Ok(task)
    }

    /// Returns every task in store order. Never cached.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.store(self.repository.list_tasks()).await
    }

    /// Returns the tasks with `status`, newest first, serving the list from
    /// the cache when possible.
    pub async fn list_tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, TaskError> {
        let cache_key = tasks_by_status_key(status);

        if let Some(bytes) = self.cache_get(&cache_key).await {
            match deserialize_tasks(&bytes) {
                Ok(tasks) => {
                    tracing::trace!(%status, count = tasks.len(), "Cache hit for status list");
                    return Ok(tasks);
                }
                Err(err) => {
                    tracing::warn!(%status, error = %err, "Cached status list deserialization failed")
                }
            }
        }

        tracing::trace!(%status, "Cache miss for status list");
        let generation = self.status_generation.load(Ordering::SeqCst);
        let tasks = self
            .store(self.repository.list_tasks_by_status(status))
            .await?;

        match serialize_tasks(&tasks) {
            Ok(bytes) => self.cache_status_list(&cache_key, &bytes, generation).await,
            Err(err) => tracing::warn!(%status, error = %err, "Failed to serialize status list"),
        }

        Ok(tasks)
    }

    /// Case-insensitive title search. Never cached.
    pub async fn search_tasks(&self, fragment: &str) -> Result<Vec<Task>, TaskError> {
        self.store(self.repository.search_tasks_by_title(fragment))
            .await
    }

    /// Number of stored tasks. Never cached.
    pub async fn count_tasks(&self) -> Result<u64, TaskError> {
        self.store(self.repository.count_tasks()).await
    }

    /// Stores a new task built from `input`, with defaults applied.
    ///
    /// `input` must already be validated.
    pub async fn create_task(&self, input: TaskInput) -> Result<Task, TaskError> {
        let task = self
            .store_write(None, self.repository.insert_task(input.into_new_task()))
            .await?;

        self.cache_task(&task).await;
        self.evict_status_lists().await;

        tracing::info!(task_id = task.id, status = %task.status, "Task created");
        Ok(task)
    }

    /// Overwrites every client-settable field of task `id` with `input`.
    ///
    /// Fails with `NotFound` without touching the store when the task is gone.
    pub async fn update_task(&self, id: TaskId, input: TaskInput) -> Result<Task, TaskError> {
        let mut task = self
            .store(self.repository.get_task(id))
            .await?
            .ok_or(TaskError::NotFound { id })?;

        input.apply_to(&mut task);
        let task = self
            .store_write(Some(id), self.repository.update_task(&task))
            .await?;

        self.cache_task(&task).await;
        self.evict_status_lists().await;

        tracing::info!(task_id = id, status = %task.status, "Task updated");
        Ok(task)
    }

    /// Deletes task `id`.
    ///
    /// Fails with `NotFound` without touching the store when the task is gone.
    pub async fn delete_task(&self, id: TaskId) -> Result<(), TaskError> {
        if !self.store(self.repository.task_exists(id)).await? {
            return Err(TaskError::NotFound { id });
        }

        self.store_write(Some(id), self.repository.delete_task(id))
            .await?;

        self.evict_task(id).await;
        self.evict_status_lists().await;

        tracing::info!(task_id = id, "Task deleted");
        Ok(())
    }

    /// Whether the store answers within its timeout.
    pub async fn store_ready(&self) -> bool {
        match self.store(self.repository.count_tasks()).await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "Store readiness probe failed");
                false
            }
        }
    }

    /// Whether the cache answers within its timeout, or `None` when disabled.
    pub async fn cache_ready(&self) -> Option<bool> {
        let cache = self.cache.as_ref()?;
        Some(self.guard_cache("ping", "-", cache.ping()).await.is_some())
    }

    /// Runs a store call under the store timeout.
    async fn store<T, F>(&self, fut: F) -> Result<T, TaskError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        let result = match timeout(self.settings.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(RepositoryError::Timeout(
                self.settings.store_timeout.as_millis() as u64,
            )),
        };

        result.map_err(|err| {
            if !matches!(err, RepositoryError::NotFound { .. }) {
                tracing::error!(error = %err, "Store operation failed");
            }
            TaskError::from(err)
        })
    }

    /// Runs a store write. When it fails with anything but `NotFound` the
    /// write may still have been applied (a timed-out SQLite call keeps
    /// running), so the entries it could have changed are evicted.
    async fn store_write<T, F>(&self, id: Option<TaskId>, fut: F) -> Result<T, TaskError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        let result = self.store(fut).await;
        if let Err(TaskError::Unavailable(_)) = &result {
            if let Some(id) = id {
                self.evict_task(id).await;
            }
            self.evict_status_lists().await;
        }
        result
    }

    /// Runs a cache call under the cache timeout. Faults are logged and
    /// reported as `None`.
    async fn guard_cache<T, F>(&self, operation: &'static str, key: &str, fut: F) -> Option<T>
    where
        F: Future<Output = Result<T, CacheError>>,
    {
        let result = match timeout(self.settings.cache_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout(
                self.settings.cache_timeout.as_millis() as u64,
            )),
        };

        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(operation, key, error = %err, "Cache degraded");
                None
            }
        }
    }

    async fn cache_get(&self, key: &str) -> Option<Vec<u8>> {
        let cache = self.cache.as_ref()?;
        self.guard_cache("get", key, cache.get(key)).await.flatten()
    }

    async fn cache_set(&self, key: &str, bytes: &[u8]) {
        if let Some(cache) = &self.cache {
            self.guard_cache("set", key, cache.set(key, bytes, Some(self.settings.cache_ttl)))
                .await;
        }
    }

    async fn cache_task(&self, task: &Task) {
        if self.cache.is_none() {
            return;
        }
        match serialize_task(task) {
            Ok(bytes) => self.cache_set(&task_key(task.id), &bytes).await,
            Err(err) => tracing::warn!(task_id = task.id, error = %err, "Failed to serialize task"),
        }
    }

    /// Caches a status list loaded in `generation`, unless a write has
    /// happened since. A write that lands between the check and the `set`
    /// is caught by the second check.
    async fn cache_status_list(&self, key: &str, bytes: &[u8], generation: u64) {
        let Some(cache) = &self.cache else {
            return;
        };
        if self.status_generation.load(Ordering::SeqCst) != generation {
            tracing::trace!(key, "Status list went stale while loading, not caching");
            return;
        }

        self.cache_set(key, bytes).await;

        if self.status_generation.load(Ordering::SeqCst) != generation {
            self.guard_cache("delete", key, cache.delete(key)).await;
        }
    }

    async fn evict_task(&self, id: TaskId) {
        if let Some(cache) = &self.cache {
            let cache_key = task_key(id);
            self.guard_cache("delete", &cache_key, cache.delete(&cache_key))
                .await;
        }
    }

    async fn evict_status_lists(&self) {
        self.status_generation.fetch_add(1, Ordering::SeqCst);
        if let Some(cache) = &self.cache {
            let pattern = tasks_by_status_pattern();
            self.guard_cache("delete_pattern", &pattern, cache.delete_pattern(&pattern))
                .await;
        }
    }
}
