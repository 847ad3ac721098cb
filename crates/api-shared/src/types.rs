//! Request and response bodies shared by the HTTP surfaces.
//!
//! Field names are the camelCase names clients already use (`patientName`, `testDate`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Candidate diagnostic test record, as submitted by `POST /tests` and `PUT /tests/{id}`.
///
/// Documentation only: handlers accept any JSON value and validate it themselves, so that
/// malformed fields are reported field by field instead of as a single decode failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticTestReq {
    #[schema(example = "Jane Doe")]
    pub patient_name: String,
    #[schema(example = "Blood Panel")]
    pub test_type: String,
    #[schema(example = "Normal")]
    pub result: String,
    /// RFC 3339 date-time; any offset is accepted and normalised to UTC.
    #[schema(example = "2024-01-15T10:00:00Z")]
    pub test_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A persisted diagnostic test record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticTestRes {
    pub id: i64,
    pub patient_name: String,
    pub test_type: String,
    pub result: String,
    pub test_date: DateTime<Utc>,
    /// `null` when no notes were recorded.
    pub notes: Option<String>,
}

/// One field-level validation message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorRes {
    pub field: String,
    pub message: String,
}

/// Error body returned by every failing request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    /// Human-readable summary.
    pub error: String,
    /// Present only for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldErrorRes>>,
}

impl ErrorRes {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<FieldErrorRes>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

/// Liveness response for `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_errors_omit_details() {
        let json = serde_json::to_value(ErrorRes::message("Test not found")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Test not found" }));
    }

    #[test]
    fn validation_errors_carry_details() {
        let body = ErrorRes::with_details(
            "Invalid data",
            vec![FieldErrorRes {
                field: "testDate".into(),
                message: "testDate required".into(),
            }],
        );
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["details"][0]["field"], "testDate");
        assert_eq!(json["details"][0]["message"], "testDate required");
    }

    #[test]
    fn request_uses_camel_case() {
        let req: DiagnosticTestReq = serde_json::from_value(serde_json::json!({
            "patientName": "Jane Doe",
            "testType": "Blood Panel",
            "result": "Normal",
            "testDate": "2024-01-15T10:00:00Z",
        }))
        .unwrap();
        assert_eq!(req.patient_name, "Jane Doe");
        assert_eq!(req.notes, None);
    }
}
