//! In-memory cache backend.
//!
//! Single-instance LRU cache with lazy TTL expiry.

mod cache;

pub use cache::MemoryCache;
