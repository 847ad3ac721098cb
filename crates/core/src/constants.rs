//! Constants used throughout the diagnostics core crate.

/// Default SQLite database file when no explicit path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "diagnostics.db";

/// Database path value selecting a private in-memory SQLite database.
pub const IN_MEMORY_DATABASE_PATH: &str = ":memory:";

/// Default SQLite busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// JSON field names of a diagnostic test record.
pub mod fields {
    pub const PATIENT_NAME: &str = "patientName";
    pub const TEST_TYPE: &str = "testType";
    pub const RESULT: &str = "result";
    pub const TEST_DATE: &str = "testDate";
    pub const NOTES: &str = "notes";
    /// Pseudo-field used when the candidate is not a JSON object at all.
    pub const BODY: &str = "body";
}
