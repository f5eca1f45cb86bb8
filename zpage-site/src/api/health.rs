//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use zpage_common::ProjectId;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `source_id()` of the configured record provider
    pub provider: String,
    pub project_id: ProjectId,
}

/// GET /health
///
/// Reports which provider backs the page without performing a lookup, so
/// it answers even when the catalog has no row for the project.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.provider.source_id().to_string(),
        project_id: state.project_id,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
