/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates without a time component (goal due dates).
pub type Date = chrono::NaiveDate;

/// Enum discriminants stored as SMALLINT (roles, goal status, priority).
pub type ChoiceId = i16;
