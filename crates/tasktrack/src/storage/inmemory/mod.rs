//! In-memory storage backend.
//!
//! Tasks live in a `BTreeMap` behind a `tokio::sync::RwLock`, so iteration
//! order matches id order. Nothing is persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use tasktrack::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
