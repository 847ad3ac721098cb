//! # API REST
//!
//! REST API for diagnostic test records.
//!
//! Handles:
//! - HTTP endpoints with axum (`/tests`, `/tests/{id}`, `/health`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `diag-core` for all record logic.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;
pub mod router;

pub use error::ApiError;
pub use router::{build_router, ApiDoc};

use diag_core::RecordService;

/// Application state for the REST API server
///
/// Holds the record service every handler delegates to. The service carries its own store
/// handle, so cloning the state per request is cheap.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: RecordService,
}
