//! In-memory cache implementation with tags and LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using
//! tokio synchronization primitives and LRU eviction policy.
//!
//! Every key is indexed under each of its tags so tag-based deletion only
//! visits the keys of the rarest requested tag. The index is updated on
//! overwrite, delete, expiry and LRU eviction.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use birthdays_core::cache::{tags_match_all, Cache, Result, TagSet};

/// A single cache entry with its tags and optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    tags: TagSet,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, tags: TagSet, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self {
            value,
            tags,
            expires_at,
        }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// LRU store plus the tag index, guarded together so they never drift apart.
#[derive(Debug)]
struct TaggedStore {
    entries: LruCache<String, CacheEntry>,
    /// Maps tag -> keys carrying that tag.
    tag_index: HashMap<String, HashSet<String>>,
}

impl TaggedStore {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            tag_index: HashMap::new(),
        }
    }

    fn insert(&mut self, key: &str, entry: CacheEntry) {
        // Old tags of an overwritten key must not linger in the index
        self.remove(key);

        let tags = entry.tags.clone();
        if let Some((evicted_key, evicted)) = self.entries.push(key.to_string(), entry) {
            self.unindex(&evicted_key, &evicted.tags);
        }
        for tag in tags {
            self.tag_index
                .entry(tag)
                .or_default()
                .insert(key.to_string());
        }
    }

    fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.pop(key)?;
        self.unindex(key, &entry.tags);
        Some(entry)
    }

    fn unindex(&mut self, key: &str, tags: &TagSet) {
        for tag in tags {
            if let Some(keys) = self.tag_index.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.tag_index.remove(tag);
                }
            }
        }
    }

    /// Keys whose tags are a superset of `tags`.
    fn keys_tagged_with_all(&self, tags: &TagSet) -> Vec<String> {
        // A tag nobody carries means nothing can match
        let Some(indexed) = tags
            .iter()
            .map(|tag| self.tag_index.get(tag))
            .collect::<Option<Vec<_>>>()
        else {
            return Vec::new();
        };

        let Some(smallest) = indexed.into_iter().min_by_key(|keys| keys.len()) else {
            return Vec::new();
        };

        smallest
            .iter()
            .filter(|key| {
                self.entries
                    .peek(key.as_str())
                    .is_some_and(|entry| tags_match_all(&entry.tags, tags))
            })
            .cloned()
            .collect()
    }
}

/// In-memory cache implementation with tags and LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<_>>` for concurrent access.
/// Supports TTL with lazy expiration (entries are dropped on access).
/// Uses LRU eviction to limit memory usage when max_entries is reached.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<TaggedStore>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in.
    ///   A value of 0 is treated as 1.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(TaggedStore::new(capacity))),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        match store.entries.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        // Expired: drop it so the tag index stays accurate
        store.remove(key);
        Ok(None)
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let store = self.store.read().await;
        Ok(store
            .entries
            .peek(key)
            .is_some_and(|entry| !entry.is_expired()))
    }

    async fn set(
        &self,
        key: &str,
        value: &[u8],
        tags: &TagSet,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let entry = CacheEntry::new(value.to_vec(), tags.clone(), ttl);
        self.store.write().await.insert(key, entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.remove(key);
        Ok(())
    }

    async fn delete_by_tags(&self, tags: &TagSet) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }

        let mut store = self.store.write().await;
        let keys_to_delete = store.keys_tagged_with_all(tags);
        for key in &keys_to_delete {
            store.remove(key);
        }

        tracing::trace!(?tags, count = keys_to_delete.len(), "Deleted tagged cache entries");
        Ok(())
    }
}
