//! Core types and pure logic for the birthdays service.
//!
//! - [`birthday`]: the record type, month/day filters and range resolution
//! - [`cache`]: the tagged cache trait, key construction and serialization
//! - [`storage`]: repository traits and their error type

pub mod birthday;
pub mod cache;
pub mod storage;
