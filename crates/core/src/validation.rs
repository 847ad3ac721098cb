//! Input validation for diagnostic test records.
//!
//! Every write path (create and full replace) runs its candidate through [`validate_candidate`]
//! before the store is touched. The check is strict: one bad field rejects the whole payload,
//! and every failing field is reported rather than just the first one.

use crate::constants::fields;
use crate::model::NewDiagnosticTest;
use chrono::{DateTime, Utc};
use diag_types::NonEmptyText;
use serde::Serialize;
use serde_json::{Map, Value};

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All field failures found in one candidate, in field order.
///
/// Never empty: a `ValidationErrors` value exists only when validation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Names of the fields that failed, in the order they were checked.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates an untyped candidate and normalises it into a [`NewDiagnosticTest`].
///
/// Unknown keys, including any client-supplied `id`, are ignored.
///
/// # Errors
///
/// Returns [`ValidationErrors`] naming each missing or malformed field when:
/// - the candidate is not a JSON object,
/// - `patientName`, `testType` or `result` is missing, not a string, or blank,
/// - `testDate` is missing, not a string, or not an RFC 3339 timestamp,
/// - `notes` is present but neither a string nor `null`.
pub fn validate_candidate(input: &Value) -> Result<NewDiagnosticTest, ValidationErrors> {
    let Some(object) = input.as_object() else {
        return Err(ValidationErrors(vec![FieldError::new(
            fields::BODY,
            "body must be a JSON object",
        )]));
    };

    let mut errors = Vec::new();

    let patient_name = required_text(object, fields::PATIENT_NAME, &mut errors);
    let test_type = required_text(object, fields::TEST_TYPE, &mut errors);
    let result = required_text(object, fields::RESULT, &mut errors);
    let test_date = required_timestamp(object, fields::TEST_DATE, &mut errors);
    let notes = optional_text(object, fields::NOTES, &mut errors);

    match (patient_name, test_type, result, test_date, notes) {
        (Some(patient_name), Some(test_type), Some(result), Some(test_date), Some(notes))
            if errors.is_empty() =>
        {
            Ok(NewDiagnosticTest {
                patient_name,
                test_type,
                result,
                test_date,
                notes,
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

/// Parses an RFC 3339 / ISO-8601 date-time with offset and normalises it to UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|v| !v.is_null())
}

fn required_string<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match present(object, field) {
        None => {
            errors.push(FieldError::new(field, format!("{field} required")));
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{field} must be a string")));
            None
        }
    }
}

fn required_text(
    object: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<NonEmptyText> {
    let raw = required_string(object, field, errors)?;
    match NonEmptyText::new(raw) {
        Ok(text) => Some(text),
        Err(_) => {
            errors.push(FieldError::new(field, format!("{field} must not be empty")));
            None
        }
    }
}

fn required_timestamp(
    object: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<DateTime<Utc>> {
    let raw = required_string(object, field, errors)?;
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        errors.push(FieldError::new(
            field,
            format!("{field} not a valid timestamp"),
        ));
    }
    parsed
}

// Outer `None` means the field was malformed; `Some(None)` means it was absent.
fn optional_text(
    object: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<Option<String>> {
    match present(object, field) {
        None => Some(None),
        Some(Value::String(s)) => Some(Some(s.clone())),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{field} must be a string")));
            None
        }
    }
}
