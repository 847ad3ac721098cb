use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diag_core::{
    CoreConfig, RecordService, SqliteStore,
    config::{busy_timeout_from_env_value, database_path_from_env_value},
};

/// Main entry point for the diagnostics server
///
/// Resolves configuration once, opens the record store and serves the REST API.
///
/// # Environment Variables
/// - `DIAG_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `DIAG_DATABASE_PATH`: SQLite database file, or `:memory:` (default: "diagnostics.db")
/// - `DIAG_BUSY_TIMEOUT_MS`: SQLite busy timeout in milliseconds (default: 5000)
/// - `RUST_LOG`: tracing filter directives
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the database cannot be opened,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("diagnostics_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("diag_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("DIAG_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        database_path_from_env_value(std::env::var("DIAG_DATABASE_PATH").ok()),
        busy_timeout_from_env_value(std::env::var("DIAG_BUSY_TIMEOUT_MS").ok())?,
    )?;
    if cfg.is_in_memory() {
        tracing::warn!("using an in-memory database; records are lost on shutdown");
    }

    let store = SqliteStore::open(&cfg)?;
    let service = RecordService::new(Arc::new(store));
    let app = api_rest::build_router(service);

    tracing::info!("++ Starting diagnostics REST API on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
