use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use birthdays_core::birthday::Birthday;

/// A birthday decorated for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayView {
    pub uid: u32,
    pub month: u32,
    pub day: u32,
    /// Full name when set, otherwise the username. `None` for unknown users.
    pub display_name: Option<String>,
    /// The birthday placed in the fixed leap display year.
    pub display_date: Option<NaiveDate>,
}

impl BirthdayView {
    pub fn new(birthday: &Birthday, display_name: Option<String>) -> Self {
        Self {
            uid: birthday.uid,
            month: birthday.month,
            day: birthday.day,
            display_name,
            display_date: birthday.display_date(),
        }
    }
}

/// Query parameters for listing birthdays. Zero or missing means "any".
#[derive(Debug, Default, Deserialize)]
pub struct ListBirthdaysQuery {
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub day: u32,
}

/// Query parameters for a date range (`YYYY-MM-DD`, inclusive).
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
}

/// Request payload for saving a birthday. Zero month or day deletes it.
#[derive(Debug, Deserialize)]
pub struct SaveBirthday {
    pub month: u32,
    pub day: u32,
}
