/// Row ids; every table keys on a `BIGSERIAL`.
pub type DbId = i64;

/// Stored as `TIMESTAMPTZ`, always handled in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
