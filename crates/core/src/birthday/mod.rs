mod error;
mod operations;
mod range;
mod types;

pub use error::{BirthdayError, RangeError};
pub use operations::{filter_by_month_day, filter_by_months, sort_by_month_day};
pub use range::{format_date, parse_date, BirthdayCalendar, BirthdayRange};
pub use types::{Birthday, MonthDayFilter, DISPLAY_YEAR, MAX_DAY, MAX_MONTH};
