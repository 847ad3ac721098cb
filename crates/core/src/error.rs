use crate::model::TestId;
use crate::validation::ValidationErrors;

/// Failures raised by a [`RecordStore`](crate::store::RecordStore) implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("store lock poisoned")]
    LockPoisoned,
    #[error("stored record {id} could not be decoded: {reason}")]
    CorruptRow { id: i64, reason: String },
    #[error("store rejected the operation: {0}")]
    Rejected(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the record service.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid data: {0}")]
    Validation(ValidationErrors),
    #[error("invalid test id: {0:?}")]
    InvalidId(String),
    #[error("test {0} not found")]
    NotFound(TestId),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<ValidationErrors> for RecordError {
    fn from(errors: ValidationErrors) -> Self {
        RecordError::Validation(errors)
    }
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;

/// Errors raised while resolving startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
