use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BirthdayError;

/// Placeholder year used to build displayable dates for year-less birthdays.
///
/// 2016 is a leap year, so February 29 can always be represented. The value is
/// never persisted.
pub const DISPLAY_YEAR: i32 = 2016;

/// Highest valid month number.
pub const MAX_MONTH: u32 = 12;

/// Highest valid day number. Not checked against the month length.
pub const MAX_DAY: u32 = 31;

/// A recurring annual date for a single user.
///
/// A `month` or `day` of zero means "no birthday set". Such records are never
/// stored; saving one removes the user's record instead.
///
/// Only [`Birthday::new`] and deserialization validate the fields. A struct
/// literal is trusted as-is, so code building records from untrusted input
/// goes through `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BirthdayFields")]
pub struct Birthday {
    pub uid: u32,
    pub month: u32,
    pub day: u32,
}

/// Wire shape of [`Birthday`], validated through [`Birthday::new`].
#[derive(Deserialize)]
struct BirthdayFields {
    uid: u32,
    month: u32,
    day: u32,
}

impl TryFrom<BirthdayFields> for Birthday {
    type Error = BirthdayError;

    fn try_from(fields: BirthdayFields) -> Result<Self, Self::Error> {
        Birthday::new(fields.uid, fields.month, fields.day)
    }
}

impl Birthday {
    /// Creates a birthday record, validating the uid and the month and day ranges.
    ///
    /// Uid 0 is reserved for users that were never saved and is rejected.
    /// Zero is accepted for both `month` and `day` (the "unset" sentinel). The
    /// day is not validated against the length of the month.
    pub fn new(uid: u32, month: u32, day: u32) -> Result<Self, BirthdayError> {
        if uid == 0 {
            return Err(BirthdayError::InvalidUid);
        }
        if month > MAX_MONTH {
            return Err(BirthdayError::InvalidMonth(month));
        }
        if day > MAX_DAY {
            return Err(BirthdayError::InvalidDay(day));
        }
        Ok(Self { uid, month, day })
    }

    /// Returns true if both month and day are set.
    pub fn is_set(&self) -> bool {
        self.month > 0 && self.day > 0
    }

    /// Returns the birthday as a date in [`DISPLAY_YEAR`].
    ///
    /// Returns `None` for unset records and for impossible dates such as
    /// April 31.
    pub fn display_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(DISPLAY_YEAR, self.month, self.day)
    }
}

/// Month/day filter for listing birthdays.
///
/// Zero in either field means "any": `month == 0` matches every stored month,
/// `day == 0` matches every stored day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthDayFilter {
    pub month: u32,
    pub day: u32,
}

impl MonthDayFilter {
    /// Creates a filter, validating the month and day ranges.
    pub fn new(month: u32, day: u32) -> Result<Self, BirthdayError> {
        if month > MAX_MONTH {
            return Err(BirthdayError::InvalidMonth(month));
        }
        if day > MAX_DAY {
            return Err(BirthdayError::InvalidDay(day));
        }
        Ok(Self { month, day })
    }

    /// A filter matching every stored birthday.
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns true if the record passes this filter.
    pub fn matches(&self, birthday: &Birthday) -> bool {
        let month_ok = if self.month == 0 {
            birthday.month > 0
        } else {
            birthday.month == self.month
        };
        let day_ok = if self.day == 0 {
            birthday.day > 0
        } else {
            birthday.day == self.day
        };
        month_ok && day_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_sentinels() {
        let birthday = Birthday::new(7, 0, 0).unwrap();
        assert!(!birthday.is_set());
    }

    #[test]
    fn test_new_rejects_reserved_uid() {
        assert_eq!(Birthday::new(0, 3, 15), Err(BirthdayError::InvalidUid));
    }

    #[test]
    fn test_deserialize_validates_fields() {
        let parsed: Birthday =
            serde_json::from_str(r#"{"uid": 3, "month": 2, "day": 29}"#).unwrap();
        assert_eq!(parsed, Birthday::new(3, 2, 29).unwrap());

        assert!(serde_json::from_str::<Birthday>(r#"{"uid": 3, "month": 13, "day": 1}"#).is_err());
        assert!(serde_json::from_str::<Birthday>(r#"{"uid": 0, "month": 2, "day": 1}"#).is_err());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Birthday::new(1, 13, 1), Err(BirthdayError::InvalidMonth(13)));
        assert_eq!(Birthday::new(1, 1, 32), Err(BirthdayError::InvalidDay(32)));
    }

    #[test]
    fn test_new_does_not_check_month_length() {
        let birthday = Birthday::new(1, 4, 31).unwrap();
        assert!(birthday.is_set());
        assert_eq!(birthday.display_date(), None);
    }

    #[test]
    fn test_display_date_supports_leap_day() {
        let birthday = Birthday::new(1, 2, 29).unwrap();
        assert_eq!(
            birthday.display_date(),
            NaiveDate::from_ymd_opt(DISPLAY_YEAR, 2, 29)
        );
    }

    #[test]
    fn test_is_set() {
        assert!(Birthday::new(1, 6, 1).unwrap().is_set());
        assert!(!Birthday::new(1, 0, 5).unwrap().is_set());
        assert!(!Birthday::new(1, 5, 0).unwrap().is_set());
    }

    #[test]
    fn test_filter_any_month_any_day() {
        let filter = MonthDayFilter::all();
        assert!(filter.matches(&Birthday::new(1, 6, 1).unwrap()));
        assert!(!filter.matches(&Birthday::new(1, 0, 1).unwrap()));
        assert!(!filter.matches(&Birthday::new(1, 6, 0).unwrap()));
    }

    #[test]
    fn test_filter_month_only() {
        let filter = MonthDayFilter::new(6, 0).unwrap();
        assert!(filter.matches(&Birthday::new(1, 6, 1).unwrap()));
        assert!(filter.matches(&Birthday::new(2, 6, 30).unwrap()));
        assert!(!filter.matches(&Birthday::new(3, 7, 1).unwrap()));
    }

    #[test]
    fn test_filter_day_only() {
        let filter = MonthDayFilter::new(0, 1).unwrap();
        assert!(filter.matches(&Birthday::new(1, 6, 1).unwrap()));
        assert!(filter.matches(&Birthday::new(2, 12, 1).unwrap()));
        assert!(!filter.matches(&Birthday::new(3, 6, 2).unwrap()));
    }

    #[test]
    fn test_filter_rejects_out_of_range() {
        assert_eq!(
            MonthDayFilter::new(13, 0),
            Err(BirthdayError::InvalidMonth(13))
        );
        assert_eq!(MonthDayFilter::new(0, 40), Err(BirthdayError::InvalidDay(40)));
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let birthday = Birthday::new(42, 12, 20).unwrap();
        let json = serde_json::to_value(birthday).unwrap();
        assert_eq!(json, serde_json::json!({"uid": 42, "month": 12, "day": 20}));
    }
}
