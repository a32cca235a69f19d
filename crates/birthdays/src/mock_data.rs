//! Demo users and birthdays for `--demo`.

use crate::{error::ServiceError, service::BirthdayService};

/// A demo user with their birthday.
#[derive(Debug, Clone, Copy)]
pub struct DemoUser {
    pub uid: u32,
    pub username: &'static str,
    pub fullname: Option<&'static str>,
    pub month: u32,
    pub day: u32,
}

/// Demo users. Includes a leap-day birthday and a pair on either side of New Year.
pub const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        uid: 1,
        username: "sarah",
        fullname: Some("Sarah Connor"),
        month: 12,
        day: 28,
    },
    DemoUser {
        uid: 2,
        username: "miles",
        fullname: Some("Miles Dyson"),
        month: 1,
        day: 3,
    },
    DemoUser {
        uid: 3,
        username: "leapling",
        fullname: None,
        month: 2,
        day: 29,
    },
    DemoUser {
        uid: 4,
        username: "kyle",
        fullname: Some("Kyle Reese"),
        month: 5,
        day: 12,
    },
    DemoUser {
        uid: 5,
        username: "john",
        fullname: Some(""),
        month: 5,
        day: 12,
    },
    DemoUser {
        uid: 6,
        username: "marcus",
        fullname: Some("Marcus Wright"),
        month: 8,
        day: 31,
    },
];

/// Saves every demo birthday through the service so the cache path runs too.
pub async fn seed_birthdays(service: &BirthdayService) -> Result<(), ServiceError> {
    for user in DEMO_USERS {
        service.save(user.uid, user.month, user.day).await?;
    }
    tracing::info!(count = DEMO_USERS.len(), "Seeded demo birthdays");
    Ok(())
}
