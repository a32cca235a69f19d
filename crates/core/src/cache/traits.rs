use std::time::Duration;

use async_trait::async_trait;

use super::{Result, TagSet};

/// Trait for tagged cache backends.
///
/// Every entry carries a set of tags. [`Cache::delete_by_tags`] removes the
/// entries whose tag set contains *all* of the requested tags, so broader
/// groups (e.g. every multi-record query) can be dropped without touching
/// entries that lack one of the tags.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Returns true if a live value exists for the key.
    async fn has(&self, key: &str) -> Result<bool>;

    /// Sets a value in the cache with its tags and an optional TTL.
    ///
    /// Overwriting a key replaces its tags.
    async fn set(
        &self,
        key: &str,
        value: &[u8],
        tags: &TagSet,
        ttl: Option<Duration>,
    ) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes every value whose tags are a superset of `tags`.
    async fn delete_by_tags(&self, tags: &TagSet) -> Result<()>;
}
