//! In-memory cache backend implementation.
//!
//! Provides a thread-safe in-memory cache with tags, TTL support and LRU
//! eviction for single-instance deployments.

mod cache;

pub use cache::MemoryCache;
