//! SQLite schema definitions and SQL query constants.
//!
//! Pure data and query builders, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Birthdays table, one row per user
CREATE TABLE IF NOT EXISTS birthdays (
    uid INTEGER PRIMARY KEY CHECK (uid > 0),
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    day INTEGER NOT NULL CHECK (day BETWEEN 1 AND 31)
);

-- Users table, read for display names
CREATE TABLE IF NOT EXISTS users (
    uid INTEGER PRIMARY KEY,
    username TEXT NOT NULL,
    fullname TEXT
);

CREATE INDEX IF NOT EXISTS idx_birthdays_month_day ON birthdays(month, day);
"#;

// Birthday queries
pub const UPSERT_BIRTHDAY: &str = r#"
INSERT INTO birthdays (uid, month, day)
VALUES (?1, ?2, ?3)
ON CONFLICT(uid) DO UPDATE SET month = excluded.month, day = excluded.day
"#;

pub const DELETE_BIRTHDAY: &str = r#"
DELETE FROM birthdays WHERE uid = ?1
"#;

pub const SELECT_BIRTHDAY_BY_UID: &str = r#"
SELECT uid, month, day
FROM birthdays
WHERE uid = ?1
"#;

/// A zero parameter matches any stored value greater than zero.
pub const SELECT_BIRTHDAYS_BY_MONTH_DAY: &str = r#"
SELECT uid, month, day
FROM birthdays
WHERE ((?1 = 0 AND month > 0) OR month = ?1)
  AND ((?2 = 0 AND day > 0) OR day = ?2)
ORDER BY month, day, uid
"#;

// User queries
pub const UPSERT_USER: &str = r#"
INSERT INTO users (uid, username, fullname)
VALUES (?1, ?2, ?3)
ON CONFLICT(uid) DO UPDATE SET username = excluded.username, fullname = excluded.fullname
"#;

pub const SELECT_DISPLAY_NAME: &str = r#"
SELECT COALESCE(NULLIF(TRIM(fullname), ''), username)
FROM users
WHERE uid = ?1
"#;

/// Builds the month membership query with one positional parameter per month.
///
/// Returns `None` for an empty month list, which matches no rows.
pub fn select_birthdays_by_months(count: usize) -> Option<String> {
    if count == 0 {
        return None;
    }

    let placeholders = (1..=count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");

    Some(format!(
        "SELECT uid, month, day FROM birthdays WHERE month IN ({placeholders}) ORDER BY month, day, uid"
    ))
}
