//! In-memory storage backend.
//!
//! Keeps birthdays in a `BTreeMap` and users in a `HashMap`, both behind
//! `Arc<RwLock<_>>`. Nothing is persisted.

mod repository;

pub use repository::InMemoryRepository;
