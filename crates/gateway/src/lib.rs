//! API Gateway Library
//!
//! HTTP surface for the users resource: router, handlers, configuration and
//! the startup sequence (connectivity check, schema initialization, listen).

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use tokio::net::TcpListener;
use tracing::{error, info};

use common::{expose_error_details, AppError, AppResult, DatabaseConfig};
use user_service_lib::infra::{initialize_schema, Database, SchemaReport};

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect, verify connectivity and make sure the schema exists.
///
/// Any failure here means the server must not start.
pub async fn prepare_database(config: &DatabaseConfig) -> AppResult<(Database, SchemaReport)> {
    let database = Database::connect(config)
        .await
        .inspect_err(|e| error!("Cannot start server without database connection: {}", e))?;

    database
        .ping()
        .await
        .inspect_err(|e| error!("Cannot start server without database connection: {}", e))?;
    info!(backend = %database.kind(), "Database connection verified");

    let report = initialize_schema(database.adapter().as_ref()).await?;
    Ok((database, report))
}

/// Run the HTTP server until Ctrl+C.
pub async fn run(config: GatewayConfig) -> AppResult<()> {
    expose_error_details(config.service.is_development());

    let (database, report) = prepare_database(&config.database).await?;
    if report.seeded {
        info!("Seeded empty users table");
    }

    let addr = config.service.bind_address();
    let state = AppState::from_database(database, config);
    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, draining connections...");
}
