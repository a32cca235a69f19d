//! Cached query facade over the birthday store.
//!
//! Implements the cache-aside pattern:
//! - **Reads**: check the cache first, on miss fetch from the repository and
//!   populate the cache
//! - **Writes**: persist to the repository, then invalidate every cached
//!   multi-record query and refresh the per-user entry
//!
//! Cache failures are logged and absorbed. Storage and validation failures
//! are returned to the caller.
//!
//! Every invalidation bumps a generation counter. A read that missed the cache
//! only keeps what it cached if no invalidation ran while it was fetching, so
//! a concurrent write can never leave a pre-write result behind.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use birthdays_core::birthday::{
    Birthday, BirthdayCalendar, BirthdayError, BirthdayRange, MonthDayFilter,
};
use birthdays_core::cache::{
    deserialize_birthday, deserialize_birthdays, deserialize_calendar, month_day_key, range_key,
    range_tags, serialize_birthday, serialize_birthdays, serialize_calendar, user_key, user_tags,
    Cache, SerializationError, TagSet,
};
use birthdays_core::storage::BirthdayRepository;

use crate::error::ServiceError;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Birthday queries and writes with tag-based cache invalidation.
///
/// Cloning is cheap; clones share the repository and cache.
#[derive(Clone)]
pub struct BirthdayService {
    repository: Arc<dyn BirthdayRepository>,
    cache: Arc<dyn Cache>,
    ttl: Option<Duration>,
    /// Bumped before every invalidation.
    generation: Arc<AtomicU64>,
}

impl BirthdayService {
    /// Creates a new service.
    ///
    /// # Arguments
    ///
    /// * `repository` - The record store
    /// * `cache` - The tagged cache
    /// * `ttl` - Expiry for cached entries, `None` to keep them until invalidated
    pub fn new(
        repository: Arc<dyn BirthdayRepository>,
        cache: Arc<dyn Cache>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            repository,
            cache,
            ttl,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Lists birthdays matching a month/day filter, ordered by month and day.
    pub async fn get_all(&self, filter: MonthDayFilter) -> Result<Vec<Birthday>> {
        let cache_key = month_day_key(filter);

        if let Some(birthdays) = self.read_cached(&cache_key, deserialize_birthdays).await {
            tracing::trace!(
                month = filter.month,
                day = filter.day,
                count = birthdays.len(),
                "Cache hit for birthdays"
            );
            return Ok(birthdays);
        }

        tracing::trace!(month = filter.month, day = filter.day, "Cache miss for birthdays");
        let generation = self.current_generation();
        let birthdays = self.repository.fetch_by_month_day(filter).await?;

        self.fill_cache(
            &cache_key,
            serialize_birthdays(&birthdays),
            &range_tags(),
            generation,
        )
        .await;

        Ok(birthdays)
    }

    /// Resolves every birthday falling inside `range` to its occurrence date.
    pub async fn get_range(&self, range: &BirthdayRange) -> Result<BirthdayCalendar> {
        let cache_key = range_key(range);

        if let Some(calendar) = self.read_cached(&cache_key, deserialize_calendar).await {
            tracing::trace!(
                start = %range.start(),
                end = %range.end(),
                dates = calendar.len(),
                "Cache hit for birthday range"
            );
            return Ok(calendar);
        }

        tracing::trace!(start = %range.start(), end = %range.end(), "Cache miss for birthday range");
        let generation = self.current_generation();
        let birthdays = self
            .repository
            .fetch_by_months(&range.candidate_months())
            .await?;
        let calendar = range.resolve(&birthdays);

        self.fill_cache(
            &cache_key,
            serialize_calendar(&calendar),
            &range_tags(),
            generation,
        )
        .await;

        Ok(calendar)
    }

    /// Gets the birthday of a single user.
    ///
    /// Only found records are cached.
    pub async fn get_user(&self, uid: u32) -> Result<Option<Birthday>> {
        let cache_key = user_key(uid);

        if let Some(birthday) = self.read_cached(&cache_key, deserialize_birthday).await {
            tracing::trace!(uid, "Cache hit for user birthday");
            return Ok(Some(birthday));
        }

        tracing::trace!(uid, "Cache miss for user birthday");
        let generation = self.current_generation();
        let birthday = self.repository.fetch_by_uid(uid).await?;

        if let Some(ref b) = birthday {
            self.fill_cache(&cache_key, serialize_birthday(b), &user_tags(), generation)
                .await;
        }

        Ok(birthday)
    }

    /// Creates or updates a user's birthday.
    ///
    /// A zero month or day deletes the record instead. Uid 0 is reserved and
    /// rejected.
    pub async fn save(&self, uid: u32, month: u32, day: u32) -> Result<()> {
        if uid == 0 {
            return Err(BirthdayError::InvalidUid.into());
        }
        if month == 0 || day == 0 {
            tracing::debug!(uid, month, day, "Unset birthday, deleting");
            return self.delete(uid).await;
        }

        let birthday = Birthday::new(uid, month, day)?;
        self.repository.upsert(&birthday).await?;
        tracing::debug!(uid, month, day, "Saved birthday");

        self.invalidate_ranges().await;
        self.write_cached(&user_key(uid), serialize_birthday(&birthday), &user_tags())
            .await;

        Ok(())
    }

    /// Deletes a user's birthday.
    ///
    /// The cache is invalidated even when the store call fails.
    pub async fn delete(&self, uid: u32) -> Result<()> {
        let result = self.repository.delete_by_uid(uid).await;
        match &result {
            Ok(()) => tracing::debug!(uid, "Deleted birthday"),
            Err(err) => tracing::warn!(uid, error = %err, "Failed to delete birthday"),
        }

        self.invalidate_ranges().await;
        if let Err(err) = self.cache.delete(&user_key(uid)).await {
            tracing::warn!(uid, error = %err, "Failed to evict user birthday");
        }

        result.map_err(ServiceError::from)
    }

    /// Checks that the record store answers queries. Bypasses the cache.
    pub async fn check_storage(&self) -> Result<()> {
        self.repository.fetch_by_uid(0).await?;
        Ok(())
    }

    async fn read_cached<T>(
        &self,
        key: &str,
        decode: fn(&[u8]) -> std::result::Result<T, SerializationError>,
    ) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match decode(&bytes) {
                Ok(value) => Some(value),
                Err(err) => {
                    // Treat as a miss; the next write overwrites it
                    tracing::warn!(key, error = %err, "Cache entry deserialization failed");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "Cache read failed");
                None
            }
        }
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Caches a freshly fetched read result unless an invalidation ran since
    /// `generation` was taken.
    ///
    /// The counter is checked again after the write: an invalidation that
    /// bumped it in between may already have run its tag deletion, so the
    /// entry is dropped again.
    async fn fill_cache(
        &self,
        key: &str,
        bytes: std::result::Result<Vec<u8>, SerializationError>,
        tags: &TagSet,
        generation: u64,
    ) {
        if self.current_generation() != generation {
            tracing::trace!(key, "Skipping cache fill after concurrent invalidation");
            return;
        }

        self.write_cached(key, bytes, tags).await;

        if self.current_generation() != generation {
            tracing::trace!(key, "Dropping cache fill raced by invalidation");
            if let Err(err) = self.cache.delete(key).await {
                tracing::warn!(key, error = %err, "Failed to drop raced cache entry");
            }
        }
    }

    async fn write_cached(
        &self,
        key: &str,
        bytes: std::result::Result<Vec<u8>, SerializationError>,
        tags: &TagSet,
    ) {
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(key, error = %err, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(err) = self.cache.set(key, &bytes, tags, self.ttl).await {
            tracing::warn!(key, error = %err, "Failed to cache entry");
        }
    }

    async fn invalidate_ranges(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Err(err) = self.cache.delete_by_tags(&range_tags()).await {
            tracing::warn!(error = %err, "Failed to invalidate cached birthday lists");
        }
    }
}
