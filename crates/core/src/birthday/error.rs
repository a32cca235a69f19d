use thiserror::Error;

/// Errors that can occur when constructing a birthday record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BirthdayError {
    #[error("Invalid uid 0 (reserved for unsaved users)")]
    InvalidUid,
    #[error("Invalid month {0} (expected 0-12)")]
    InvalidMonth(u32),
    #[error("Invalid day {0} (expected 0-31)")]
    InvalidDay(u32),
}

/// Errors that can occur when constructing a birthday range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid range: start date must be before or equal to end date")]
    StartAfterEnd,
    #[error("Invalid range: {start} to {end} must stay within one year or end in an earlier month of the next year")]
    SpanTooLong { start: String, end: String },
}
