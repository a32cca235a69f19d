//! Redis cache backend implementation.
//!
//! Provides a distributed cache using Redis for multi-instance deployments.
//! Tags are tracked in Redis Sets so tag-based deletion never needs SCAN.

mod cache;
mod error;

pub use cache::RedisCache;
