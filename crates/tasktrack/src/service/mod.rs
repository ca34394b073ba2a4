//! Task service: the only component that talks to both the store and the cache.
//!
//! Reads follow cache-aside (cache, then store, then populate). Writes go to
//! the store first and only then touch the cache. Every backend call is
//! bounded by a timeout; cache faults degrade to store reads and are never
//! surfaced to callers.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let repo = Arc::new(SqliteRepository::new("tasktrack.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//!
//! let service = TaskService::new(repo, Some(cache), ServiceSettings::default());
//! let task = service.get_task(1).await?;
//! ```

mod task;

pub use task::{ServiceSettings, TaskService};
