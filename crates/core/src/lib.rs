//! Functional core for tasktrack.
//!
//! Pure types and functions shared by the server and the client: the task
//! domain, cache key layout, storage and cache traits, error taxonomy and the
//! API response envelope. Nothing in here performs I/O.

pub mod api;
pub mod cache;
pub mod serde;
pub mod storage;
pub mod task;
