/// Record ids are small integers assigned as `max(existing) + 1`.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
