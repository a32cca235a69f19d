use async_trait::async_trait;

use crate::birthday::{Birthday, MonthDayFilter};

use super::Result;

/// Repository for birthday records, keyed by user id.
#[async_trait]
pub trait BirthdayRepository: Send + Sync {
    /// Inserts the record, or updates the existing one for the same uid.
    ///
    /// Implementations must do this in a single atomic operation.
    async fn upsert(&self, birthday: &Birthday) -> Result<()>;

    /// Deletes the record for a user. Deleting a missing record is not an error.
    async fn delete_by_uid(&self, uid: u32) -> Result<()>;

    /// Gets the record for a user.
    async fn fetch_by_uid(&self, uid: u32) -> Result<Option<Birthday>>;

    /// Gets the records matching a month/day filter, ordered by month and day.
    async fn fetch_by_month_day(&self, filter: MonthDayFilter) -> Result<Vec<Birthday>>;

    /// Gets the records whose month is in `months`, ordered by month and day.
    async fn fetch_by_months(&self, months: &[u32]) -> Result<Vec<Birthday>>;
}

/// Read-only lookup of user display names.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Gets the display name for a user, if the user exists.
    async fn display_name(&self, uid: u32) -> Result<Option<String>>;
}
