//! Redis cache implementation.
//!
//! Uses set-based tag tracking for tag deletion without SCAN:
//!
//! - `birthdays:_tag:{tag}` holds every cache key carrying `tag`
//! - `{key}:_tags` holds the tags of `key`, so a single delete can clean up
//!   the tag sets it belongs to
//!
//! `set` and `delete` run their commands in a MULTI/EXEC pipeline.
//! `delete_by_tags` intersects the tag sets first and then deletes each key;
//! a crash in between leaves stale members in the tag sets, which is harmless
//! because DEL and SREM on missing keys are no-ops.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use birthdays_core::cache::{key_tags_key, tag_index_key, Cache, Result, TagSet};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(key).await.map_err(map_redis_error)?;
        Ok(exists)
    }

    async fn set(
        &self,
        key: &str,
        value: &[u8],
        tags: &TagSet,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut conn = self.conn.clone();
        let tags_key = key_tags_key(key);

        // Tags from a previous write of this key
        let previous: Vec<String> = conn.smembers(&tags_key).await.map_err(map_redis_error)?;

        let mut pipe = redis::pipe();
        pipe.atomic();
        for tag in &previous {
            pipe.srem(tag_index_key(tag), key).ignore();
        }
        pipe.del(&tags_key).ignore();

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                pipe.set_ex(key, value, seconds).ignore();
            }
            None => {
                pipe.set(key, value).ignore();
            }
        }

        if !tags.is_empty() {
            let members: Vec<&str> = tags.iter().map(String::as_str).collect();
            pipe.sadd(&tags_key, members).ignore();
            if let Some(duration) = ttl {
                let seconds = i64::try_from(duration.as_secs().max(1)).unwrap_or(i64::MAX);
                pipe.expire(&tags_key, seconds).ignore();
            }
            for tag in tags {
                pipe.sadd(tag_index_key(tag), key).ignore();
            }
        }

        let _: () = pipe.query_async(&mut conn).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let tags_key = key_tags_key(key);

        let tags: Vec<String> = conn.smembers(&tags_key).await.map_err(map_redis_error)?;

        let mut pipe = redis::pipe();
        pipe.atomic();
        for tag in &tags {
            pipe.srem(tag_index_key(tag), key).ignore();
        }
        pipe.del(key).ignore();
        pipe.del(&tags_key).ignore();

        let _: () = pipe.query_async(&mut conn).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete_by_tags(&self, tags: &TagSet) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        let index_keys: Vec<String> = tags.iter().map(|tag| tag_index_key(tag)).collect();

        // Keys present in every requested tag set
        let keys: Vec<String> = conn.sinter(&index_keys).await.map_err(map_redis_error)?;

        for key in &keys {
            self.delete(key).await?;
        }

        tracing::trace!(?tags, count = keys.len(), "Deleted tagged cache entries");
        Ok(())
    }
}
