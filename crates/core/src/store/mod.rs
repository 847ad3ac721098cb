//! # Record storage
//!
//! The [`RecordStore`] trait is the create/read/update/delete contract the record service
//! depends on. A store handle is injected into
//! [`RecordService`](crate::service::RecordService) at construction, so tests and alternative
//! deployments can swap the backend without touching service logic.
//!
//! ## Implementations
//!
//! - [`SqliteStore`]: the relational store, one `diagnostic_tests` table.
//! - [`InMemoryStore`]: a map behind a mutex, used as a test double and for throwaway runs.
//!
//! Stores see only validated [`NewDiagnosticTest`] values; they never validate input.

use crate::error::StoreResult;
use crate::model::{DiagnosticTest, NewDiagnosticTest, TestId};

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

/// Persistence contract for diagnostic test records.
///
/// Every method is a single round trip. "No such record" is reported as `Ok(None)`, never as
/// an error, so callers can distinguish it from store failures.
pub trait RecordStore: Send + Sync {
    /// All records, in the store's default order.
    fn list(&self) -> StoreResult<Vec<DiagnosticTest>>;

    /// The record with `id`, if present.
    fn get(&self, id: TestId) -> StoreResult<Option<DiagnosticTest>>;

    /// Persist a new record and return it with its freshly assigned id.
    fn insert(&self, record: &NewDiagnosticTest) -> StoreResult<DiagnosticTest>;

    /// Replace every field of the record with `id`; `None` if it does not exist.
    fn replace(
        &self,
        id: TestId,
        record: &NewDiagnosticTest,
    ) -> StoreResult<Option<DiagnosticTest>>;

    /// Remove the record with `id` and return its prior state; `None` if it does not exist.
    fn remove(&self, id: TestId) -> StoreResult<Option<DiagnosticTest>>;
}
