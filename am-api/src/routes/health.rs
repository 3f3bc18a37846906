//! Health check endpoints

use axum::{extract::State, Json};

use crate::dto::{HealthResponse, ReadyResponse};
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
        version: state.version.clone(),
    })
}

/// Ready check endpoint (verifies database connectivity)
pub async fn ready_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    let database = match state.database.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let status = if database { "ready" } else { "degraded" };

    Json(ReadyResponse {
        status: status.to_string(),
        database,
        version: state.version.clone(),
    })
}
