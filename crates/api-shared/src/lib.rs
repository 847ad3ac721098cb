//! # API Shared
//!
//! Shared definitions for the diagnostics HTTP API.
//!
//! Contains:
//! - Request/response bodies with OpenAPI schemas (`types` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; kept free of domain logic so other front ends can reuse the wire types.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
