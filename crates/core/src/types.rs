/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Wizard steps are numbered from 1 within the active schema.
pub type StepNumber = u8;
