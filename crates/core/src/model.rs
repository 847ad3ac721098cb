//! Diagnostic test record types.

use chrono::{DateTime, Utc};
use diag_types::NonEmptyText;
use serde::Serialize;

/// Store-assigned identifier of a diagnostic test record.
///
/// Always a positive integer; construction goes through [`TestId::parse`] or
/// [`TestId::new`], both of which reject zero and negatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TestId(i64);

impl TestId {
    /// Wraps a raw store id, returning `None` unless it is positive.
    pub fn new(raw: i64) -> Option<Self> {
        (raw >= 1).then_some(Self(raw))
    }

    /// Parses an id from request text (for example a URL path segment).
    ///
    /// Only plain decimal digits are accepted, with surrounding whitespace ignored. Signs,
    /// fractions, exponents and values outside `1..=i64::MAX` are rejected.
    pub fn parse(input: &str) -> Option<Self> {
        let digits = input.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<i64>().ok().and_then(Self::new)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated candidate record, ready to be written to the store.
///
/// Only the validation module produces these from untyped input, so every value reaching a
/// store has all required fields present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiagnosticTest {
    pub patient_name: NonEmptyText,
    pub test_type: NonEmptyText,
    pub result: NonEmptyText,
    pub test_date: DateTime<Utc>,
    /// `None` when the client omitted notes; `Some("")` is kept distinct.
    pub notes: Option<String>,
}

impl NewDiagnosticTest {
    /// Attaches a store-assigned id, producing the persisted form.
    pub fn with_id(self, id: TestId) -> DiagnosticTest {
        DiagnosticTest {
            id,
            patient_name: self.patient_name,
            test_type: self.test_type,
            result: self.result,
            test_date: self.test_date,
            notes: self.notes,
        }
    }
}

/// A persisted diagnostic test record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticTest {
    pub id: TestId,
    pub patient_name: NonEmptyText,
    pub test_type: NonEmptyText,
    pub result: NonEmptyText,
    pub test_date: DateTime<Utc>,
    pub notes: Option<String>,
}
