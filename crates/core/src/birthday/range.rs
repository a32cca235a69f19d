//! Resolution of year-less birthdays against a concrete calendar window.
//!
//! Pure functions only. The caller fetches the records for
//! [`BirthdayRange::candidate_months`] and hands them to
//! [`BirthdayRange::resolve`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::{Birthday, RangeError};

/// Birthdays grouped by occurrence date (`YYYY-MM-DD`), in chronological order.
pub type BirthdayCalendar = BTreeMap<String, Vec<u32>>;

/// Date format used for range boundaries and occurrence keys.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive calendar window that may cross one year boundary.
///
/// A window is accepted when both dates fall in the same year, or when it
/// wraps into the following year and ends in an earlier month than it starts
/// (e.g. December 15 to January 15). Longer windows cannot be resolved
/// against year-less records and are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl BirthdayRange {
    /// Creates a range, validating ordering and span.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::StartAfterEnd);
        }

        let same_year = start.year() == end.year();
        let single_wrap = end.year() == start.year() + 1 && end.month() < start.month();
        if !same_year && !single_wrap {
            return Err(RangeError::SpanTooLong {
                start: format_date(start),
                end: format_date(end),
            });
        }

        Ok(Self { start, end })
    }

    /// Parses both boundaries from `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, RangeError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if the window crosses into the next calendar year.
    pub fn wraps_year(&self) -> bool {
        self.end.month() < self.start.month()
    }

    /// Months that may contain birthdays inside this window.
    ///
    /// Wrapping windows scan from the start month through December and then
    /// January through the end month.
    pub fn candidate_months(&self) -> Vec<u32> {
        let (start_month, end_month) = (self.start.month(), self.end.month());
        if self.wraps_year() {
            (start_month..=12).chain(1..=end_month).collect()
        } else {
            (start_month..=end_month).collect()
        }
    }

    /// Builds the `YYYY-MM-DD` key for the occurrence of `birthday` nearest to
    /// this window.
    ///
    /// The key is assembled as a string, so impossible dates (February 29 in
    /// a common year, April 31) pass through unchanged.
    pub fn occurrence_key(&self, birthday: &Birthday) -> String {
        let year = if self.wraps_year() && birthday.month < self.start.month() {
            self.end.year()
        } else {
            self.start.year()
        };
        format!("{:04}-{:02}-{:02}", year, birthday.month, birthday.day)
    }

    /// Groups the uids of `birthdays` by occurrence date, keeping only dates
    /// inside the window (both boundaries inclusive).
    ///
    /// Within a date, uids keep the order in which they were supplied.
    pub fn resolve(&self, birthdays: &[Birthday]) -> BirthdayCalendar {
        let lower = format_date(self.start);
        let upper = format_date(self.end);

        let mut calendar = BirthdayCalendar::new();
        for birthday in birthdays {
            let key = self.occurrence_key(birthday);
            if key < lower || key > upper {
                continue;
            }
            calendar.entry(key).or_default().push(birthday.uid);
        }
        calendar
    }
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` date, failing on anything else.
pub fn parse_date(value: &str) -> Result<NaiveDate, RangeError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| RangeError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bday(uid: u32, month: u32, day: u32) -> Birthday {
        Birthday { uid, month, day }
    }

    #[test]
    fn test_parse_valid() {
        let range = BirthdayRange::parse("2023-12-15", "2024-01-10").unwrap();
        assert_eq!(range.start(), date(2023, 12, 15));
        assert_eq!(range.end(), date(2024, 1, 10));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(
            BirthdayRange::parse("2023-12-15", "tomorrow"),
            Err(RangeError::InvalidDate("tomorrow".to_string()))
        );
        assert_eq!(
            BirthdayRange::parse("2023-02-30", "2023-03-01"),
            Err(RangeError::InvalidDate("2023-02-30".to_string()))
        );
    }

    #[test]
    fn test_start_after_end_rejected() {
        assert_eq!(
            BirthdayRange::new(date(2024, 1, 10), date(2024, 1, 5)),
            Err(RangeError::StartAfterEnd)
        );
    }

    #[test]
    fn test_span_too_long_rejected() {
        let result = BirthdayRange::new(date(2023, 3, 1), date(2024, 3, 1));
        assert!(matches!(result, Err(RangeError::SpanTooLong { .. })));

        let result = BirthdayRange::new(date(2022, 12, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(RangeError::SpanTooLong { .. })));
    }

    #[test]
    fn test_candidate_months_same_year() {
        let range = BirthdayRange::new(date(2024, 3, 10), date(2024, 5, 2)).unwrap();
        assert!(!range.wraps_year());
        assert_eq!(range.candidate_months(), vec![3, 4, 5]);
    }

    #[test]
    fn test_candidate_months_single_month() {
        let range = BirthdayRange::new(date(2024, 6, 1), date(2024, 6, 30)).unwrap();
        assert_eq!(range.candidate_months(), vec![6]);
    }

    #[test]
    fn test_candidate_months_wrapping() {
        let range = BirthdayRange::new(date(2023, 11, 15), date(2024, 2, 10)).unwrap();
        assert!(range.wraps_year());
        assert_eq!(range.candidate_months(), vec![11, 12, 1, 2]);
    }

    #[test]
    fn test_resolve_wraparound() {
        let range = BirthdayRange::parse("2023-12-15", "2024-01-10").unwrap();
        // Ordered by (month, day) as the store returns them; uid 3 is outside
        // the candidate months and would not be fetched, but must be dropped
        // anyway if present.
        let records = vec![bday(2, 1, 5), bday(3, 6, 1), bday(1, 12, 20)];

        let calendar = range.resolve(&records);

        let expected: BirthdayCalendar = [
            ("2023-12-20".to_string(), vec![1]),
            ("2024-01-05".to_string(), vec![2]),
        ]
        .into_iter()
        .collect();
        assert_eq!(calendar, expected);
    }

    #[test]
    fn test_resolve_boundaries_inclusive() {
        let records = vec![bday(2, 1, 5)];

        let same_day = BirthdayRange::parse("2024-01-05", "2024-01-05").unwrap();
        let calendar = same_day.resolve(&records);
        assert_eq!(calendar.get("2024-01-05"), Some(&vec![2]));
        assert_eq!(calendar.len(), 1);

        let after = BirthdayRange::parse("2024-01-06", "2024-01-10").unwrap();
        assert!(after.resolve(&records).is_empty());
    }

    #[test]
    fn test_resolve_trims_partial_months() {
        let range = BirthdayRange::parse("2024-03-10", "2024-05-02").unwrap();
        let records = vec![
            bday(1, 3, 9),
            bday(2, 3, 10),
            bday(3, 4, 15),
            bday(4, 5, 2),
            bday(5, 5, 3),
        ];

        let calendar = range.resolve(&records);

        let keys: Vec<&str> = calendar.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2024-03-10", "2024-04-15", "2024-05-02"]);
    }

    #[test]
    fn test_resolve_groups_in_supplied_order() {
        let range = BirthdayRange::parse("2024-07-01", "2024-07-31").unwrap();
        let records = vec![bday(9, 7, 4), bday(3, 7, 4), bday(5, 7, 4)];

        let calendar = range.resolve(&records);

        assert_eq!(calendar.get("2024-07-04"), Some(&vec![9, 3, 5]));
    }

    #[test]
    fn test_resolve_keeps_leap_day_in_common_year() {
        let range = BirthdayRange::parse("2023-02-01", "2023-03-01").unwrap();
        let calendar = range.resolve(&[bday(1, 2, 29)]);
        assert_eq!(calendar.get("2023-02-29"), Some(&vec![1]));
    }

    #[test]
    fn test_occurrence_key_zero_padded() {
        let range = BirthdayRange::parse("2024-01-01", "2024-12-31").unwrap();
        assert_eq!(range.occurrence_key(&bday(1, 3, 7)), "2024-03-07");
    }
}
