//! Service descriptor, connectivity check and the not-found fallback.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use common::ApiResponse;
use domain::{MSG_API_RUNNING, MSG_DB_CONNECTED, MSG_DB_CONNECTION_FAILED, MSG_ROUTE_NOT_FOUND};

use crate::state::AppState;

/// Endpoints advertised by the descriptor
const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /users", "Get all users"),
    ("GET /users/:id", "Get a specific user"),
    ("POST /users", "Create a new user"),
    ("PUT /users/:id", "Update a user"),
    ("DELETE /users/:id", "Delete a user"),
];

/// API descriptor returned from `/`.
#[derive(Debug, Serialize)]
pub struct ApiDescriptor {
    pub success: bool,
    pub message: String,
    pub service: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Create descriptor and connectivity routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(api_descriptor))
        .route("/db-test", get(db_test))
}

/// List the available endpoints.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "API descriptor"))
)]
pub async fn api_descriptor(State(state): State<AppState>) -> Json<ApiDescriptor> {
    Json(ApiDescriptor {
        success: true,
        message: MSG_API_RUNNING.to_string(),
        service: state.config.service.service_name.clone(),
        endpoints: ENDPOINTS.iter().copied().collect(),
    })
}

/// Round-trip a trivial query to the database.
#[utoipa::path(
    get,
    path = "/db-test",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 500, description = "Database unreachable")
    )
)]
pub async fn db_test(State(state): State<AppState>) -> Response {
    match state.database.ping().await {
        Ok(()) => Json(ApiResponse::message(MSG_DB_CONNECTED)).into_response(),
        Err(e) => {
            tracing::error!(backend = %state.database.kind(), "Database test failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(MSG_DB_CONNECTION_FAILED)),
            )
                .into_response()
        }
    }
}

/// Fallback for every unmatched route.
pub async fn route_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure(MSG_ROUTE_NOT_FOUND)),
    )
}
