//! HTTP handlers for diagnostic test records.
//!
//! Each handler is a thin shell over [`RecordService`](diag_core::RecordService): extract,
//! call one service operation, map the result. All error translation lives in
//! [`ApiError`](crate::error::ApiError).

use api_shared::{DiagnosticTestReq, DiagnosticTestRes, ErrorRes, HealthRes, HealthService};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use diag_core::DiagnosticTest;
use serde_json::Value;

use crate::error::ApiError;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used by monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/tests",
    responses(
        (status = 200, description = "All diagnostic test records", body = [DiagnosticTestRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all diagnostic test records
///
/// Returns every record in store order. There is no server-side pagination; an empty store
/// yields an empty array.
///
/// # Errors
/// Returns `500 Internal Server Error` if the store cannot be read.
#[axum::debug_handler]
pub async fn list_tests(
    State(state): State<AppState>,
) -> Result<Json<Vec<DiagnosticTestRes>>, ApiError> {
    let records = state.service.list()?;
    Ok(Json(records.into_iter().map(record_res).collect()))
}

#[utoipa::path(
    post,
    path = "/tests",
    request_body = DiagnosticTestReq,
    responses(
        (status = 201, description = "Diagnostic test created", body = DiagnosticTestRes),
        (status = 400, description = "Invalid data", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a diagnostic test record
///
/// The body is validated field by field; nothing is written unless every field is valid.
///
/// # Errors
/// - `400 Bad Request` if the body is not JSON or fails validation,
/// - `500 Internal Server Error` if the store rejects the write.
#[axum::debug_handler]
pub async fn create_test(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DiagnosticTestRes>), ApiError> {
    let Json(candidate) = payload?;
    let created = state.service.create(&candidate)?;
    tracing::info!("Created diagnostic test {}", created.id);
    Ok((StatusCode::CREATED, Json(record_res(created))))
}

#[utoipa::path(
    get,
    path = "/tests/{id}",
    params(("id" = String, Path, description = "Record id, a positive integer")),
    responses(
        (status = 200, description = "Diagnostic test found", body = DiagnosticTestRes),
        (status = 400, description = "Invalid id", body = ErrorRes),
        (status = 404, description = "Test not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Fetch one diagnostic test record
#[axum::debug_handler]
pub async fn get_test(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiagnosticTestRes>, ApiError> {
    let record = state.service.get(&id)?;
    Ok(Json(record_res(record)))
}

#[utoipa::path(
    put,
    path = "/tests/{id}",
    params(("id" = String, Path, description = "Record id, a positive integer")),
    request_body = DiagnosticTestReq,
    responses(
        (status = 200, description = "Diagnostic test replaced", body = DiagnosticTestRes),
        (status = 400, description = "Invalid id or data", body = ErrorRes),
        (status = 404, description = "Test not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Replace a diagnostic test record
///
/// Full replacement: fields omitted from the body (such as `notes`) are cleared.
#[axum::debug_handler]
pub async fn update_test(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DiagnosticTestRes>, ApiError> {
    let Json(candidate) = payload?;
    let updated = state.service.update(&id, &candidate)?;
    tracing::info!("Updated diagnostic test {}", updated.id);
    Ok(Json(record_res(updated)))
}

#[utoipa::path(
    delete,
    path = "/tests/{id}",
    params(("id" = String, Path, description = "Record id, a positive integer")),
    responses(
        (status = 200, description = "Diagnostic test deleted; body is its prior state", body = DiagnosticTestRes),
        (status = 400, description = "Invalid id", body = ErrorRes),
        (status = 404, description = "Test not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Delete a diagnostic test record
#[axum::debug_handler]
pub async fn delete_test(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiagnosticTestRes>, ApiError> {
    let removed = state.service.delete(&id)?;
    tracing::info!("Deleted diagnostic test {}", removed.id);
    Ok(Json(record_res(removed)))
}

fn record_res(record: DiagnosticTest) -> DiagnosticTestRes {
    DiagnosticTestRes {
        id: record.id.get(),
        patient_name: record.patient_name.into_inner(),
        test_type: record.test_type.into_inner(),
        result: record.result.into_inner(),
        test_date: record.test_date,
        notes: record.notes,
    }
}
