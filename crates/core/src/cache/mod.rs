mod error;
mod keys;
mod serialization;
mod tags;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    key_tags_key, month_day_key, namespaced_key, range_key, tag_index_key, user_key, BASE_TAG,
    RANGE_TAG,
};
pub use serialization::{
    deserialize_birthday, deserialize_birthdays, deserialize_calendar, serialize_birthday,
    serialize_birthdays, serialize_calendar, SerializationError,
};
pub use tags::{cache_tags, range_tags, tags_match_all, user_tags, TagSet};
pub use traits::Cache;
