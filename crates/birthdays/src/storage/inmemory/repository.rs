//! In-memory repository implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use birthdays_core::birthday::{filter_by_month_day, filter_by_months, Birthday, MonthDayFilter};
use birthdays_core::storage::{BirthdayRepository, RepositoryError, Result, UserDirectory};

/// A user directory row.
#[derive(Debug, Clone)]
struct UserRecord {
    username: String,
    fullname: Option<String>,
}

impl UserRecord {
    fn display_name(&self) -> String {
        match self.fullname.as_deref().map(str::trim) {
            Some(fullname) if !fullname.is_empty() => fullname.to_string(),
            _ => self.username.clone(),
        }
    }
}

/// In-memory storage backend.
///
/// Data is lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    birthdays: Arc<RwLock<BTreeMap<u32, Birthday>>>,
    users: Arc<RwLock<HashMap<u32, UserRecord>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a row in the user directory.
    pub async fn upsert_user(&self, uid: u32, username: &str, fullname: Option<&str>) -> Result<()> {
        let mut users = self.users.write().await;
        users.insert(
            uid,
            UserRecord {
                username: username.to_string(),
                fullname: fullname.map(str::to_string),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl BirthdayRepository for InMemoryRepository {
    async fn upsert(&self, birthday: &Birthday) -> Result<()> {
        // Same rule the SQLite CHECK constraints enforce
        let valid = Birthday::new(birthday.uid, birthday.month, birthday.day)
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;
        if !valid.is_set() {
            return Err(RepositoryError::InvalidData(format!(
                "Birthday for uid {} has no month or day",
                birthday.uid
            )));
        }

        let mut birthdays = self.birthdays.write().await;
        birthdays.insert(valid.uid, valid);
        Ok(())
    }

    async fn delete_by_uid(&self, uid: u32) -> Result<()> {
        let mut birthdays = self.birthdays.write().await;
        birthdays.remove(&uid);
        Ok(())
    }

    async fn fetch_by_uid(&self, uid: u32) -> Result<Option<Birthday>> {
        let birthdays = self.birthdays.read().await;
        Ok(birthdays.get(&uid).copied())
    }

    async fn fetch_by_month_day(&self, filter: MonthDayFilter) -> Result<Vec<Birthday>> {
        let birthdays = self.birthdays.read().await;
        Ok(filter_by_month_day(birthdays.values(), filter))
    }

    async fn fetch_by_months(&self, months: &[u32]) -> Result<Vec<Birthday>> {
        let birthdays = self.birthdays.read().await;
        Ok(filter_by_months(birthdays.values(), months))
    }
}

#[async_trait]
impl UserDirectory for InMemoryRepository {
    async fn display_name(&self, uid: u32) -> Result<Option<String>> {
        let users = self.users.read().await;
        Ok(users.get(&uid).map(UserRecord::display_name))
    }
}
