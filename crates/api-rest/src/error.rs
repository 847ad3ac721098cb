//! Translation of record errors into HTTP responses.

use api_shared::{ErrorRes, FieldErrorRes};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use diag_core::{RecordError, ValidationErrors};

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Invalid data: {0}")]
    Validation(ValidationErrors),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(detail) | ApiError::NotFound(detail) => ErrorRes::message(detail),
            ApiError::Validation(errors) => ErrorRes::with_details(
                "Invalid data",
                errors
                    .into_errors()
                    .into_iter()
                    .map(|e| FieldErrorRes {
                        field: e.field.to_string(),
                        message: e.message,
                    })
                    .collect(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!("Diagnostics API internal error: {detail}");
                ErrorRes::message("Internal error")
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Validation(errors) => ApiError::Validation(errors),
            RecordError::InvalidId(raw) => {
                ApiError::BadRequest(format!("Invalid test id: {raw:?}"))
            }
            RecordError::NotFound(_) => ApiError::NotFound("Test not found".into()),
            RecordError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diag_core::{StoreError, TestId};
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn invalid_id_returns_400() {
        let response = ApiError::from(RecordError::InvalidId("abc".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid test id: \"abc\"");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let id = TestId::new(4).unwrap();
        let response = ApiError::from(RecordError::NotFound(id)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Test not found");
    }

    #[tokio::test]
    async fn validation_lists_each_field() {
        let errors = diag_core::validate_candidate(&serde_json::json!({
            "patientName": "Jane Doe",
            "testType": "Blood Panel",
            "result": "Normal",
        }))
        .unwrap_err();

        let response = ApiError::from(RecordError::Validation(errors)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid data");
        assert_eq!(json["details"][0]["field"], "testDate");
        assert_eq!(json["details"][0]["message"], "testDate required");
    }

    #[tokio::test]
    async fn store_errors_hide_details() {
        let err = RecordError::Store(StoreError::Rejected("disk I/O error at /var/db".into()));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal error");
    }
}
