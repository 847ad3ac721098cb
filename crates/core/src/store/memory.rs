//! In-memory record store.
//!
//! Nothing is persisted. Ids are handed out from a counter that never goes backwards, matching
//! the SQLite store's "deleted ids are not reused" behaviour.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::RecordStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{DiagnosticTest, NewDiagnosticTest, TestId};

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    records: BTreeMap<TestId, DiagnosticTest>,
}

/// Map-backed store, ordered by id.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl RecordStore for InMemoryStore {
    fn list(&self) -> StoreResult<Vec<DiagnosticTest>> {
        Ok(self.inner()?.records.values().cloned().collect())
    }

    fn get(&self, id: TestId) -> StoreResult<Option<DiagnosticTest>> {
        Ok(self.inner()?.records.get(&id).cloned())
    }

    fn insert(&self, record: &NewDiagnosticTest) -> StoreResult<DiagnosticTest> {
        let mut inner = self.inner()?;
        let next = inner
            .last_id
            .checked_add(1)
            .and_then(TestId::new)
            .ok_or_else(|| StoreError::Rejected("id space exhausted".into()))?;

        inner.last_id = next.get();
        let created = record.clone().with_id(next);
        inner.records.insert(next, created.clone());
        Ok(created)
    }

    fn replace(
        &self,
        id: TestId,
        record: &NewDiagnosticTest,
    ) -> StoreResult<Option<DiagnosticTest>> {
        let mut inner = self.inner()?;
        Ok(inner.records.get_mut(&id).map(|slot| {
            *slot = record.clone().with_id(id);
            slot.clone()
        }))
    }

    fn remove(&self, id: TestId) -> StoreResult<Option<DiagnosticTest>> {
        Ok(self.inner()?.records.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use diag_types::NonEmptyText;

    fn candidate(result: &str) -> NewDiagnosticTest {
        NewDiagnosticTest {
            patient_name: NonEmptyText::new("Jane Doe").unwrap(),
            test_type: NonEmptyText::new("Lipid Panel").unwrap(),
            result: NonEmptyText::new(result).unwrap(),
            test_date: Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn crud_cycle() {
        let store = InMemoryStore::new();
        let created = store.insert(&candidate("Normal")).unwrap();
        assert_eq!(store.get(created.id).unwrap(), Some(created.clone()));

        let updated = store
            .replace(created.id, &candidate("High LDL"))
            .unwrap()
            .unwrap();
        assert_eq!(updated.result.as_str(), "High LDL");
        assert_eq!(store.list().unwrap(), vec![updated.clone()]);

        assert_eq!(store.remove(created.id).unwrap(), Some(updated));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_remove() {
        let store = InMemoryStore::new();
        let first = store.insert(&candidate("Normal")).unwrap();
        store.remove(first.id).unwrap();

        let second = store.insert(&candidate("Normal")).unwrap();
        assert_eq!(second.id.get(), first.id.get() + 1);
    }

    #[test]
    fn missing_ids_yield_none() {
        let store = InMemoryStore::new();
        let id = TestId::new(5).unwrap();
        assert_eq!(store.get(id).unwrap(), None);
        assert_eq!(store.replace(id, &candidate("Normal")).unwrap(), None);
        assert_eq!(store.remove(id).unwrap(), None);
    }
}
