//! SQLite storage backend.
//!
//! Implements [`tasktrack_core::storage::TaskRepository`] with `rusqlite`,
//! made async by `tokio-rusqlite`'s dedicated connection thread.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
