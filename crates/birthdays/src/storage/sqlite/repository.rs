//! SQLite repository implementation.
//!
//! Implements `BirthdayRepository` and `UserDirectory` from
//! `birthdays_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use birthdays_core::birthday::{Birthday, MonthDayFilter};
use birthdays_core::storage::{BirthdayRepository, RepositoryError, Result, UserDirectory};

use super::conversions::row_to_birthday;
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Owns the `birthdays` table and reads display names from `users`.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Inserts or replaces a row in the user directory.
    ///
    /// The directory belongs to the host application; this is used to seed
    /// demo data.
    pub async fn upsert_user(&self, uid: u32, username: &str, fullname: Option<&str>) -> Result<()> {
        let username = username.to_string();
        let fullname = fullname.map(str::to_string);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::UPSERT_USER,
                    rusqlite::params![uid, username, fullname],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }
}

// ============================================================================
// BirthdayRepository implementation
// ============================================================================

#[async_trait]
impl BirthdayRepository for SqliteRepository {
    async fn upsert(&self, birthday: &Birthday) -> Result<()> {
        let Birthday { uid, month, day } = *birthday;

        self.conn
            .call(move |conn| {
                conn.execute(schema::UPSERT_BIRTHDAY, rusqlite::params![uid, month, day])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Birthday"))
    }

    async fn delete_by_uid(&self, uid: u32) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_BIRTHDAY, [uid])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Birthday"))
    }

    async fn fetch_by_uid(&self, uid: u32) -> Result<Option<Birthday>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_BIRTHDAY_BY_UID)
                    .map_err(wrap_err)?;
                match stmt.query_row([uid], row_to_birthday) {
                    Ok(birthday) => Ok(Some(birthday)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Birthday"))
    }

    async fn fetch_by_month_day(&self, filter: MonthDayFilter) -> Result<Vec<Birthday>> {
        let MonthDayFilter { month, day } = filter;

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_BIRTHDAYS_BY_MONTH_DAY)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([month, day], row_to_birthday)
                    .map_err(wrap_err)?;

                let mut birthdays = Vec::new();
                for row_result in rows {
                    birthdays.push(row_result.map_err(wrap_err)?);
                }
                Ok(birthdays)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Birthday"))
    }

    async fn fetch_by_months(&self, months: &[u32]) -> Result<Vec<Birthday>> {
        let Some(sql) = schema::select_birthdays_by_months(months.len()) else {
            return Ok(Vec::new());
        };
        let months = months.to_vec();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(months.iter()), row_to_birthday)
                    .map_err(wrap_err)?;

                let mut birthdays = Vec::new();
                for row_result in rows {
                    birthdays.push(row_result.map_err(wrap_err)?);
                }
                Ok(birthdays)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Birthday"))
    }
}

// ============================================================================
// UserDirectory implementation
// ============================================================================

#[async_trait]
impl UserDirectory for SqliteRepository {
    async fn display_name(&self, uid: u32) -> Result<Option<String>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_DISPLAY_NAME)
                    .map_err(wrap_err)?;
                match stmt.query_row([uid], |row| row.get::<_, Option<String>>(0)) {
                    Ok(name) => Ok(name),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    fn birthday(uid: u32, month: u32, day: u32) -> Birthday {
        Birthday { uid, month, day }
    }

    #[tokio::test]
    async fn test_upsert_and_fetch_by_uid() {
        let repo = repo().await;

        repo.upsert(&birthday(1, 3, 15)).await.unwrap();

        let fetched = repo.fetch_by_uid(1).await.unwrap();
        assert_eq!(fetched, Some(birthday(1, 3, 15)));
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let repo = repo().await;

        repo.upsert(&birthday(1, 3, 15)).await.unwrap();
        repo.upsert(&birthday(1, 3, 15)).await.unwrap();

        let all = repo.fetch_by_month_day(MonthDayFilter::all()).await.unwrap();
        assert_eq!(all, vec![birthday(1, 3, 15)]);
    }

    #[tokio::test]
    async fn test_upsert_updates_existing_row() {
        let repo = repo().await;

        repo.upsert(&birthday(1, 3, 15)).await.unwrap();
        repo.upsert(&birthday(1, 7, 4)).await.unwrap();

        assert_eq!(repo.fetch_by_uid(1).await.unwrap(), Some(birthday(1, 7, 4)));
    }

    #[tokio::test]
    async fn test_upsert_rejects_zero_month() {
        let repo = repo().await;

        let result = repo.upsert(&birthday(1, 0, 15)).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        assert_eq!(repo.fetch_by_uid(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_rejects_reserved_uid() {
        let repo = repo().await;

        let result = repo.upsert(&birthday(0, 3, 15)).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        assert_eq!(repo.fetch_by_uid(0).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_by_uid_missing() {
        let repo = repo().await;
        assert_eq!(repo.fetch_by_uid(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_by_uid_is_idempotent() {
        let repo = repo().await;

        repo.upsert(&birthday(1, 3, 15)).await.unwrap();
        repo.delete_by_uid(1).await.unwrap();
        repo.delete_by_uid(1).await.unwrap();

        assert_eq!(repo.fetch_by_uid(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_by_month_day_filters_and_orders() {
        let repo = repo().await;

        repo.upsert(&birthday(3, 5, 20)).await.unwrap();
        repo.upsert(&birthday(1, 5, 2)).await.unwrap();
        repo.upsert(&birthday(2, 1, 20)).await.unwrap();
        repo.upsert(&birthday(4, 5, 2)).await.unwrap();

        let all = repo.fetch_by_month_day(MonthDayFilter::all()).await.unwrap();
        assert_eq!(
            all,
            vec![
                birthday(2, 1, 20),
                birthday(1, 5, 2),
                birthday(4, 5, 2),
                birthday(3, 5, 20),
            ]
        );

        let may = repo
            .fetch_by_month_day(MonthDayFilter { month: 5, day: 0 })
            .await
            .unwrap();
        assert_eq!(
            may,
            vec![birthday(1, 5, 2), birthday(4, 5, 2), birthday(3, 5, 20)]
        );

        let twentieth = repo
            .fetch_by_month_day(MonthDayFilter { month: 0, day: 20 })
            .await
            .unwrap();
        assert_eq!(twentieth, vec![birthday(2, 1, 20), birthday(3, 5, 20)]);

        let exact = repo
            .fetch_by_month_day(MonthDayFilter { month: 5, day: 2 })
            .await
            .unwrap();
        assert_eq!(exact, vec![birthday(1, 5, 2), birthday(4, 5, 2)]);
    }

    #[tokio::test]
    async fn test_fetch_by_months() {
        let repo = repo().await;

        repo.upsert(&birthday(1, 12, 30)).await.unwrap();
        repo.upsert(&birthday(2, 1, 2)).await.unwrap();
        repo.upsert(&birthday(3, 6, 1)).await.unwrap();

        let result = repo.fetch_by_months(&[12, 1]).await.unwrap();
        assert_eq!(result, vec![birthday(2, 1, 2), birthday(1, 12, 30)]);

        assert!(repo.fetch_by_months(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_display_name_prefers_fullname() {
        let repo = repo().await;

        repo.upsert_user(1, "ada", Some("Ada Lovelace")).await.unwrap();
        repo.upsert_user(2, "alan", Some("  ")).await.unwrap();
        repo.upsert_user(3, "grace", None).await.unwrap();

        assert_eq!(
            repo.display_name(1).await.unwrap(),
            Some("Ada Lovelace".to_string())
        );
        assert_eq!(repo.display_name(2).await.unwrap(), Some("alan".to_string()));
        assert_eq!(repo.display_name(3).await.unwrap(), Some("grace".to_string()));
        assert_eq!(repo.display_name(4).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_connections() {
        let path = std::env::temp_dir().join(format!(
            "birthdays_test_{}.db",
            std::process::id()
        ));
        let path_str = path.to_string_lossy().to_string();

        {
            let repo = SqliteRepository::new(&path_str).await.unwrap();
            repo.upsert(&birthday(7, 2, 29)).await.unwrap();
        }

        let repo = SqliteRepository::new(&path_str).await.unwrap();
        assert_eq!(repo.fetch_by_uid(7).await.unwrap(), Some(birthday(7, 2, 29)));

        let _ = std::fs::remove_file(&path);
    }
}
