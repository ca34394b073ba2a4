//! Application state.
//!
//! Holds the task service shared by every handler plus the static facts the
//! health endpoint reports. The backend combination is picked by feature
//! flags; each combination gets its own `AppState::new` factory.

use std::{sync::Arc, time::Duration};

use tasktrack_core::cache::Cache;
use tasktrack_core::storage::TaskRepository;

use crate::config::Config;
use crate::service::{ServiceSettings, TaskService};

/// Static application facts reported by `GET /v1/health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
}

/// Shared application state.
///
/// Cloned for each request handler; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Task service (owns every store and cache access).
    pub tasks: Arc<TaskService>,
    /// Application facts for the health endpoint.
    pub info: Arc<AppInfo>,
    /// Upper bound for a whole HTTP request.
    pub request_timeout: Duration,
}

impl AppState {
    /// Wires the service from a repository, an optional cache and the config.
    ///
    /// The cache is dropped when `CACHE_ENABLED=false`.
    pub(crate) fn build(
        repository: Arc<dyn TaskRepository>,
        cache: Option<Arc<dyn Cache>>,
        config: &Config,
    ) -> Self {
        let cache = cache.filter(|_| config.cache_enabled);
        let settings = ServiceSettings {
            cache_ttl: config.cache_ttl(),
            cache_timeout: config.cache_timeout(),
            store_timeout: config.store_timeout(),
        };

        let tasks = TaskService::new(repository, cache, settings);

        tracing::info!(
            cache_enabled = tasks.cache_enabled(),
            cache_ttl_secs = settings.cache_ttl.as_secs(),
            "Task service configured"
        );

        Self {
            tasks: Arc::new(tasks),
            info: Arc::new(AppInfo {
                name: config.app_name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                environment: config.app_environment.clone(),
            }),
            request_timeout: config.request_timeout(),
        }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let memory_cache: Arc<dyn Cache> =
                Arc::new(MemoryCache::new(config.cache_max_entries));

            tracing::info!(path = %config.sqlite_path, "Using SQLite store with memory cache");
            Ok(Self::build(sqlite_repo, Some(memory_cache), config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        ///
        /// No Redis connection is attempted when the cache is disabled.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let redis_cache: Option<Arc<dyn Cache>> = if config.cache_enabled {
                Some(Arc::new(
                    RedisCache::new(&config.redis_connection_url()).await?,
                ))
            } else {
                None
            };

            tracing::info!(path = %config.sqlite_path, "Using SQLite store with Redis cache");
            Ok(Self::build(sqlite_repo, redis_cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for running without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let memory_cache: Arc<dyn Cache> =
                Arc::new(MemoryCache::new(config.cache_max_entries));

            tracing::info!("Using in-memory store with memory cache");
            Ok(Self::build(inmemory_repo, Some(memory_cache), config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let redis_cache: Option<Arc<dyn Cache>> = if config.cache_enabled {
                Some(Arc::new(
                    RedisCache::new(&config.redis_connection_url()).await?,
                ))
            } else {
                None
            };

            tracing::info!("Using in-memory store with Redis cache");
            Ok(Self::build(inmemory_repo, redis_cache, config))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================
