//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! These functions use JSON serialization for cache storage, providing human-readable
//! cache values that are easy to debug and inspect.

use crate::birthday::{Birthday, BirthdayCalendar};
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a single birthday to JSON bytes.
pub fn serialize_birthday(birthday: &Birthday) -> Result<Vec<u8>> {
    serde_json::to_vec(birthday).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a single birthday.
pub fn deserialize_birthday(bytes: &[u8]) -> Result<Birthday> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes an ordered list of birthdays to JSON bytes.
pub fn serialize_birthdays(birthdays: &[Birthday]) -> Result<Vec<u8>> {
    serde_json::to_vec(birthdays).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an ordered list of birthdays.
pub fn deserialize_birthdays(bytes: &[u8]) -> Result<Vec<Birthday>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a date → uids mapping to JSON bytes.
///
/// The mapping is encoded as a JSON object keyed by `YYYY-MM-DD`.
pub fn serialize_calendar(calendar: &BirthdayCalendar) -> Result<Vec<u8>> {
    serde_json::to_vec(calendar).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a date → uids mapping.
pub fn deserialize_calendar(bytes: &[u8]) -> Result<BirthdayCalendar> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_birthdays_preserves_order() {
        let birthdays = vec![
            Birthday { uid: 2, month: 1, day: 5 },
            Birthday { uid: 1, month: 12, day: 20 },
        ];

        let bytes = serialize_birthdays(&birthdays).expect("serialize should succeed");
        let deserialized = deserialize_birthdays(&bytes).expect("deserialize should succeed");

        assert_eq!(birthdays, deserialized);
    }

    #[test]
    fn test_calendar_is_json_object() {
        let mut calendar = BirthdayCalendar::new();
        calendar.insert("2024-01-05".to_string(), vec![2, 7]);

        let bytes = serialize_calendar(&calendar).expect("serialize should succeed");

        assert_eq!(bytes, br#"{"2024-01-05":[2,7]}"#);
        assert_eq!(deserialize_calendar(&bytes).unwrap(), calendar);
    }

    #[test]
    fn test_serialize_empty_birthdays() {
        let bytes = serialize_birthdays(&[]).expect("serialize should succeed");
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn test_deserialize_birthday_malformed_bytes() {
        let result = deserialize_birthday(b"not valid json");

        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_deserialize_birthdays_wrong_shape() {
        let result = deserialize_birthdays(br#"{"uid": 1}"#);

        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_deserialize_calendar_wrong_shape() {
        let result = deserialize_calendar(b"[1, 2, 3]");

        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }
}
