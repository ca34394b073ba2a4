//! Redis cache backend.
//!
//! Distributed cache for multi-instance deployments, with TTL via `SET EX`
//! and set-based key tracking for pattern deletion.

mod cache;
mod error;

pub use cache::RedisCache;
