//! # Diag Core
//!
//! Core business logic for diagnostic test records.
//!
//! This crate contains the record model, input validation, the storage contract with its
//! SQLite and in-memory implementations, and the [`RecordService`] that ties them together.
//!
//! **No API concerns**: HTTP servers, JSON error bodies and CLI output belong in `api-rest`,
//! `api-shared` or `diag-cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use constants::{DEFAULT_DATABASE_PATH, IN_MEMORY_DATABASE_PATH};
pub use diag_types::{NonEmptyText, TextError};
pub use error::{ConfigError, RecordError, RecordResult, StoreError, StoreResult};
pub use model::{DiagnosticTest, NewDiagnosticTest, TestId};
pub use service::RecordService;
pub use store::{InMemoryStore, RecordStore, SqliteStore};
pub use validation::{validate_candidate, FieldError, ValidationErrors};
