//! Router assembly and OpenAPI document.

use axum::{routing::get, Router};
use diag_core::RecordService;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_tests,
        handlers::create_test,
        handlers::get_test,
        handlers::update_test,
        handlers::delete_test,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::DiagnosticTestReq,
        api_shared::DiagnosticTestRes,
        api_shared::ErrorRes,
        api_shared::FieldErrorRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router.
///
/// Routes:
/// - `GET /health`
/// - `GET /tests`, `POST /tests`
/// - `GET /tests/:id`, `PUT /tests/:id`, `DELETE /tests/:id`
/// - Swagger UI at `/swagger-ui`, OpenAPI JSON at `/api-docs/openapi.json`
///
/// CORS is permissive so a browser front end served from another origin can call the API.
pub fn build_router(service: RecordService) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/tests",
            get(handlers::list_tests).post(handlers::create_test),
        )
        .route(
            "/tests/:id",
            get(handlers::get_test)
                .put(handlers::update_test)
                .delete(handlers::delete_test),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { service })
}
