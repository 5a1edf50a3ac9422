//! Liveness and readiness endpoints

use axum::{extract::State, http::StatusCode};
use serde_json::{json, Value};
use tracing::warn;

use crate::api::types::Json;

use super::state::AppState;

/// `GET /health`: the process is up
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// `GET /ready`: 503 until the database answers a ping
pub async fn ready_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.user_service.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "database": "ok" })),
        ),
        Err(e) => {
            warn!(error = %e, "database ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "database": "unreachable" })),
            )
        }
    }
}
