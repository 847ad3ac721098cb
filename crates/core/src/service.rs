//! Diagnostic test record service.
//!
//! `RecordService` is the CRUD contract exposed to every surface (REST, CLI). It owns no state
//! of its own beyond the injected store handle, and applies one policy everywhere:
//!
//! - ids are parsed as positive integers before any store call,
//! - candidates are validated before any write,
//! - "no such record" becomes [`RecordError::NotFound`] for get, update and delete alike,
//! - store failures are wrapped as [`RecordError::Store`] and never retried.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{RecordError, RecordResult};
use crate::model::{DiagnosticTest, TestId};
use crate::store::RecordStore;
use crate::validation::validate_candidate;

#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for RecordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordService").finish_non_exhaustive()
    }
}

impl RecordService {
    /// Creates a service bound to `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Lists every record in store order.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Store` if the store cannot be read.
    pub fn list(&self) -> RecordResult<Vec<DiagnosticTest>> {
        let records = self.store.list()?;
        tracing::debug!(count = records.len(), "listed diagnostic tests");
        Ok(records)
    }

    /// Fetches one record by its textual id.
    ///
    /// # Errors
    ///
    /// - `RecordError::InvalidId` if `id` is not a positive integer (the store is not queried),
    /// - `RecordError::NotFound` if no record has that id,
    /// - `RecordError::Store` on store failure.
    pub fn get(&self, id: &str) -> RecordResult<DiagnosticTest> {
        let id = parse_id(id)?;
        self.store.get(id)?.ok_or(RecordError::NotFound(id))
    }

    /// Validates `input` and persists it as a new record.
    ///
    /// # Errors
    ///
    /// - `RecordError::Validation` if `input` fails validation (nothing is written),
    /// - `RecordError::Store` on store failure.
    pub fn create(&self, input: &Value) -> RecordResult<DiagnosticTest> {
        let candidate = validate_candidate(input)?;
        let created = self.store.insert(&candidate)?;
        tracing::debug!(id = %created.id, "created diagnostic test");
        Ok(created)
    }

    /// Replaces every field of an existing record.
    ///
    /// # Errors
    ///
    /// - `RecordError::InvalidId` if `id` is not a positive integer,
    /// - `RecordError::Validation` if `input` fails validation,
    /// - `RecordError::NotFound` if no record has that id,
    /// - `RecordError::Store` on store failure.
    pub fn update(&self, id: &str, input: &Value) -> RecordResult<DiagnosticTest> {
        let id = parse_id(id)?;
        let candidate = validate_candidate(input)?;
        let updated = self
            .store
            .replace(id, &candidate)?
            .ok_or(RecordError::NotFound(id))?;
        tracing::debug!(%id, "updated diagnostic test");
        Ok(updated)
    }

    /// Deletes a record, returning the state it had just before removal.
    ///
    /// # Errors
    ///
    /// - `RecordError::InvalidId` if `id` is not a positive integer,
    /// - `RecordError::NotFound` if no record has that id,
    /// - `RecordError::Store` on store failure.
    pub fn delete(&self, id: &str) -> RecordResult<DiagnosticTest> {
        let id = parse_id(id)?;
        let removed = self.store.remove(id)?.ok_or(RecordError::NotFound(id))?;
        tracing::debug!(%id, "deleted diagnostic test");
        Ok(removed)
    }
}

fn parse_id(raw: &str) -> RecordResult<TestId> {
    TestId::parse(raw).ok_or_else(|| RecordError::InvalidId(raw.to_string()))
}
