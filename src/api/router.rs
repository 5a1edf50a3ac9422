use axum::{
    routing::{get, post},
    Router,
};

use super::health;
use super::index;
use super::middleware;
use super::state::AppState;
use super::users;

/// Create the full router with application state and middleware
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(index::index))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/api/user", post(users::create_user))
        .with_state(state);

    middleware::apply(router)
}
