//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use birthdays_core::birthday::Birthday;
use rusqlite::Row;

/// Convert a SQLite row to a Birthday.
///
/// Expected columns: uid, month, day
pub fn row_to_birthday(row: &Row) -> rusqlite::Result<Birthday> {
    let uid: i64 = row.get(0)?;
    let month: i64 = row.get(1)?;
    let day: i64 = row.get(2)?;

    birthday_from_columns(uid, month, day)
}

/// Validates raw integer columns into a Birthday.
pub fn birthday_from_columns(uid: i64, month: i64, day: i64) -> rusqlite::Result<Birthday> {
    let uid = to_u32(0, uid)?;
    let month = to_u32(1, month)?;
    let day = to_u32(2, day)?;

    Birthday::new(uid, month, day).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Integer, Box::new(e))
    })
}

fn to_u32(index: usize, value: i64) -> rusqlite::Result<u32> {
    u32::try_from(value).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(index, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birthday_from_columns_valid() {
        let birthday = birthday_from_columns(42, 2, 29).unwrap();
        assert_eq!(birthday, Birthday { uid: 42, month: 2, day: 29 });
    }

    #[test]
    fn test_birthday_from_columns_negative_uid() {
        let result = birthday_from_columns(-1, 2, 29);
        assert!(matches!(
            result,
            Err(rusqlite::Error::IntegralValueOutOfRange(0, -1))
        ));
    }

    #[test]
    fn test_birthday_from_columns_invalid_month() {
        let result = birthday_from_columns(1, 13, 1);
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(..))
        ));
    }
}
