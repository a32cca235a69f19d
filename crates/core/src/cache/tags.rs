//! Pure functions for building and matching cache tag sets.

use std::collections::BTreeSet;

use super::keys::{BASE_TAG, RANGE_TAG};

/// An ordered set of cache tags.
pub type TagSet = BTreeSet<String>;

/// Builds a tag set containing the base tag plus `extra`.
///
/// # Examples
///
/// ```
/// use birthdays_core::cache::cache_tags;
///
/// let tags = cache_tags(&["range"]);
/// assert!(tags.contains("birthdays"));
/// assert!(tags.contains("range"));
/// ```
pub fn cache_tags(extra: &[&str]) -> TagSet {
    std::iter::once(BASE_TAG)
        .chain(extra.iter().copied())
        .map(str::to_string)
        .collect()
}

/// Tags for single-user entries.
pub fn user_tags() -> TagSet {
    cache_tags(&[])
}

/// Tags for entries derived from multi-record queries.
pub fn range_tags() -> TagSet {
    cache_tags(&[RANGE_TAG])
}

/// Checks whether an entry tagged with `entry_tags` is selected by `required`.
///
/// An entry matches when it carries every required tag. An empty requirement
/// matches nothing, so a stray call can never flush the whole cache.
///
/// # Examples
///
/// ```
/// use birthdays_core::cache::{cache_tags, tags_match_all};
///
/// let entry = cache_tags(&["range"]);
/// assert!(tags_match_all(&entry, &cache_tags(&["range"])));
/// assert!(tags_match_all(&entry, &cache_tags(&[])));
/// assert!(!tags_match_all(&cache_tags(&[]), &cache_tags(&["range"])));
/// ```
pub fn tags_match_all(entry_tags: &TagSet, required: &TagSet) -> bool {
    !required.is_empty() && required.is_subset(entry_tags)
}
