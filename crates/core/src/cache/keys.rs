use crate::birthday::{BirthdayRange, MonthDayFilter};

/// Base tag attached to every entry, also used as the key namespace.
pub const BASE_TAG: &str = "birthdays";

/// Tag attached to entries derived from multi-record queries.
pub const RANGE_TAG: &str = "range";

/// Prefixes a key with the base tag so it cannot collide with other users of
/// the same backend.
pub fn namespaced_key(key: &str) -> String {
    format!("{}_{}", BASE_TAG, key)
}

/// Returns the cache key for a single user's birthday.
pub fn user_key(uid: u32) -> String {
    namespaced_key(&format!("uid_{}", uid))
}

/// Returns the cache key for a month/day listing. Zero means "all".
pub fn month_day_key(filter: MonthDayFilter) -> String {
    namespaced_key(&format!("{}_{}", filter.month, filter.day))
}

/// Returns the cache key for a date range lookup.
pub fn range_key(range: &BirthdayRange) -> String {
    namespaced_key(&format!("{}_{}", range.start(), range.end()))
}

/// Returns the Redis Set key holding every cache key carrying `tag`.
///
/// Used by backends without native tag support to resolve
/// tag-based deletions without scanning the keyspace.
pub fn tag_index_key(tag: &str) -> String {
    format!("{}:_tag:{}", BASE_TAG, tag)
}

/// Returns the Redis Set key holding the tags of a cache key.
pub fn key_tags_key(key: &str) -> String {
    format!("{}:_tags", key)
}
