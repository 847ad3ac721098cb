//! SQLite-backed record store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::SecondsFormat;
use diag_types::NonEmptyText;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::RecordStore;
use crate::config::CoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::model::{DiagnosticTest, NewDiagnosticTest, TestId};
use crate::validation::parse_timestamp;

// AUTOINCREMENT keeps deleted ids from ever being handed out again.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS diagnostic_tests (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_name  TEXT NOT NULL,
    test_type     TEXT NOT NULL,
    result        TEXT NOT NULL,
    test_date     TEXT NOT NULL,
    notes         TEXT
);";

const SELECT_COLUMNS: &str = "id, patient_name, test_type, result, test_date, notes";

/// Relational store over a single SQLite connection.
///
/// The connection sits behind a mutex that is held for exactly one statement.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database described by `cfg`, creating the table if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Sqlite` if the file cannot be opened, the busy timeout cannot be
    /// set, or the schema cannot be created.
    pub fn open(cfg: &CoreConfig) -> StoreResult<Self> {
        let conn = if cfg.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(cfg.database_path())?
        };
        conn.busy_timeout(cfg.busy_timeout())?;
        tracing::info!(
            "opened diagnostics database at {}",
            cfg.database_path().display()
        );
        Self::from_connection(conn)
    }

    /// Open (or create) a database file at `path` with default settings.
    pub fn open_path(path: &Path) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl RecordStore for SqliteStore {
    fn list(&self) -> StoreResult<Vec<DiagnosticTest>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM diagnostic_tests ORDER BY id"
        ))?;
        let rows = stmt
            .query_map([], TestRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(TestRow::into_record).collect()
    }

    fn get(&self, id: TestId) -> StoreResult<Option<DiagnosticTest>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM diagnostic_tests WHERE id = ?1"),
                params![id.get()],
                TestRow::from_row,
            )
            .optional()?;

        row.map(TestRow::into_record).transpose()
    }

    fn insert(&self, record: &NewDiagnosticTest) -> StoreResult<DiagnosticTest> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO diagnostic_tests (patient_name, test_type, result, test_date, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.patient_name.as_str(),
                record.test_type.as_str(),
                record.result.as_str(),
                format_timestamp(record),
                record.notes,
            ],
        )?;

        let raw_id = conn.last_insert_rowid();
        let id = TestId::new(raw_id).ok_or_else(|| {
            StoreError::Rejected(format!("store assigned non-positive id {raw_id}"))
        })?;
        Ok(record.clone().with_id(id))
    }

    fn replace(
        &self,
        id: TestId,
        record: &NewDiagnosticTest,
    ) -> StoreResult<Option<DiagnosticTest>> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE diagnostic_tests
             SET patient_name = ?1, test_type = ?2, result = ?3, test_date = ?4, notes = ?5
             WHERE id = ?6",
            params![
                record.patient_name.as_str(),
                record.test_type.as_str(),
                record.result.as_str(),
                format_timestamp(record),
                record.notes,
                id.get(),
            ],
        )?;

        Ok((changed > 0).then(|| record.clone().with_id(id)))
    }

    fn remove(&self, id: TestId) -> StoreResult<Option<DiagnosticTest>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("DELETE FROM diagnostic_tests WHERE id = ?1 RETURNING {SELECT_COLUMNS}"),
                params![id.get()],
                TestRow::from_row,
            )
            .optional()?;

        row.map(TestRow::into_record).transpose()
    }
}

fn format_timestamp(record: &NewDiagnosticTest) -> String {
    record.test_date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// Raw column values; decoding into domain types happens outside the rusqlite closure so
// that malformed rows surface as `StoreError::CorruptRow`.
struct TestRow {
    id: i64,
    patient_name: String,
    test_type: String,
    result: String,
    test_date: String,
    notes: Option<String>,
}

impl TestRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            patient_name: row.get(1)?,
            test_type: row.get(2)?,
            result: row.get(3)?,
            test_date: row.get(4)?,
            notes: row.get(5)?,
        })
    }

    fn into_record(self) -> StoreResult<DiagnosticTest> {
        let id = self.id;
        let corrupt = |reason: String| StoreError::CorruptRow { id, reason };

        let text = |value: String, column: &str| {
            NonEmptyText::new(value).map_err(|e| corrupt(format!("{column}: {e}")))
        };

        Ok(DiagnosticTest {
            id: TestId::new(id).ok_or_else(|| corrupt("non-positive id".into()))?,
            patient_name: text(self.patient_name, "patient_name")?,
            test_type: text(self.test_type, "test_type")?,
            result: text(self.result, "result")?,
            test_date: parse_timestamp(&self.test_date)
                .ok_or_else(|| corrupt(format!("test_date {:?} is not RFC 3339", self.test_date)))?,
            notes: self.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn candidate(name: &str, notes: Option<&str>) -> NewDiagnosticTest {
        NewDiagnosticTest {
            patient_name: NonEmptyText::new(name).unwrap(),
            test_type: NonEmptyText::new("Blood Panel").unwrap(),
            result: NonEmptyText::new("Normal").unwrap(),
            test_date: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = store.insert(&candidate("Jane Doe", None)).unwrap();
        let second = store.insert(&candidate("John Roe", None)).unwrap();

        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
    }

    #[test]
    fn get_returns_exactly_what_insert_returned() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut input = candidate("Jane Doe", Some(""));
        input.test_date = input.test_date + chrono::Duration::microseconds(1_234);

        let created = store.insert(&input).unwrap();
        let fetched = store.get(created.id).unwrap().expect("record should exist");

        assert_eq!(fetched, created);
        assert_eq!(fetched.notes.as_deref(), Some(""));
    }

    #[test]
    fn list_is_ordered_by_id_and_empty_initially() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.list().unwrap().is_empty());

        store.insert(&candidate("B", None)).unwrap();
        store.insert(&candidate("A", None)).unwrap();
        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.patient_name.into_inner())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn replace_overwrites_all_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let created = store.insert(&candidate("Jane Doe", Some("fasting"))).unwrap();

        let replacement = candidate("Jane Smith", None);
        let updated = store
            .replace(created.id, &replacement)
            .unwrap()
            .expect("record should exist");

        assert_eq!(updated, replacement.clone().with_id(created.id));
        assert_eq!(store.get(created.id).unwrap(), Some(updated));
    }

    #[test]
    fn replace_and_remove_report_missing_records() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = TestId::new(41).unwrap();

        assert_eq!(store.replace(id, &candidate("Nobody", None)).unwrap(), None);
        assert_eq!(store.remove(id).unwrap(), None);
    }

    #[test]
    fn remove_returns_prior_state_and_ids_are_not_reused() {
        let store = SqliteStore::open_in_memory().unwrap();
        let created = store.insert(&candidate("Jane Doe", Some("fasting"))).unwrap();

        let removed = store.remove(created.id).unwrap();
        assert_eq!(removed, Some(created.clone()));
        assert_eq!(store.get(created.id).unwrap(), None);

        let next = store.insert(&candidate("John Roe", None)).unwrap();
        assert!(next.id > created.id);
    }

    #[test]
    fn corrupt_rows_are_reported() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO diagnostic_tests (patient_name, test_type, result, test_date)
                 VALUES ('Jane Doe', 'Blood Panel', 'Normal', 'last tuesday')",
                [],
            )
            .unwrap();

        let err = store.list().unwrap_err();
        assert!(matches!(err, StoreError::CorruptRow { id: 1, .. }));
    }

    #[test]
    fn records_survive_reopening_a_database_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("diagnostics.db");

        let created = {
            let store = SqliteStore::open_path(&path).unwrap();
            store.insert(&candidate("Jane Doe", Some("fasting"))).unwrap()
        };

        let reopened = SqliteStore::open_path(&path).unwrap();
        assert_eq!(reopened.list().unwrap(), vec![created]);
    }

    #[test]
    fn open_honours_config() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = CoreConfig::new(
            temp_dir.path().join("configured.db"),
            std::time::Duration::from_millis(100),
        )
        .unwrap();

        let store = SqliteStore::open(&cfg).unwrap();
        store.insert(&candidate("Jane Doe", None)).unwrap();
        assert!(cfg.database_path().is_file());
    }
}
