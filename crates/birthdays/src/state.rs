//! Application state.
//!
//! Holds the birthday service and the user directory behind trait objects.
//! Backends are selected via feature flags (see `storage` and `cache`).

use std::sync::Arc;

use birthdays_core::cache::Cache;
use birthdays_core::storage::UserDirectory;

use crate::{config::Config, mock_data, service::BirthdayService};

#[cfg(feature = "sqlite")]
type Storage = crate::storage::SqliteRepository;

#[cfg(feature = "inmemory")]
type Storage = crate::storage::InMemoryRepository;

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Cached birthday queries and writes.
    pub service: BirthdayService,
    /// Display names for decorating responses.
    pub users: Arc<dyn UserDirectory>,
}

impl AppState {
    pub fn build(service: BirthdayService, users: Arc<dyn UserDirectory>) -> Self {
        Self { service, users }
    }

    /// Creates AppState with the backends selected at compile time.
    ///
    /// With `demo`, seeds the user directory and the birthdays from
    /// [`mock_data::DEMO_USERS`].
    pub async fn new(config: &Config, demo: bool) -> Result<Self, anyhow::Error> {
        let storage = open_storage(config).await?;
        let cache = open_cache(config).await?;

        let service = BirthdayService::new(storage.clone(), cache, config.cache_ttl());

        if demo {
            for user in mock_data::DEMO_USERS {
                storage
                    .upsert_user(user.uid, user.username, user.fullname)
                    .await?;
            }
            mock_data::seed_birthdays(&service).await?;
        }

        Ok(Self::build(service, storage))
    }
}

#[cfg(feature = "sqlite")]
async fn open_storage(config: &Config) -> Result<Arc<Storage>, anyhow::Error> {
    tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
    Ok(Arc::new(Storage::new(&config.sqlite_path).await?))
}

#[cfg(feature = "inmemory")]
async fn open_storage(_config: &Config) -> Result<Arc<Storage>, anyhow::Error> {
    tracing::info!("Using in-memory storage");
    Ok(Arc::new(Storage::new()))
}

#[cfg(feature = "memory")]
async fn open_cache(config: &Config) -> Result<Arc<dyn Cache>, anyhow::Error> {
    tracing::info!(max_entries = config.cache_max_entries, "Using in-memory cache");
    Ok(Arc::new(crate::cache::MemoryCache::new(
        config.cache_max_entries,
    )))
}

#[cfg(feature = "redis")]
async fn open_cache(config: &Config) -> Result<Arc<dyn Cache>, anyhow::Error> {
    tracing::info!(url = %config.redis_url, "Using Redis cache");
    Ok(Arc::new(
        crate::cache::RedisCache::new(&config.redis_url).await?,
    ))
}

// ============================================================================
// Test support
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// State over the given in-memory repository and a fresh memory cache.
        pub fn with_repository(repository: Arc<InMemoryRepository>) -> Self {
            let service = BirthdayService::new(
                repository.clone(),
                Arc::new(MemoryCache::new(1_000)),
                None,
            );
            Self::build(service, repository)
        }
    }

    impl Default for AppState {
        fn default() -> Self {
            Self::with_repository(Arc::new(InMemoryRepository::new()))
        }
    }
}
