mod birthday;

pub use birthday::{BirthdayView, ListBirthdaysQuery, RangeQuery, SaveBirthday};
