//! API middleware components

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod logging;
pub mod panic;

pub use logging::logging_middleware;

/// Wrap the router with request ids, tracing, access logs and panic recovery
pub fn apply(router: Router) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(logging_middleware))
        .layer(CatchPanicLayer::custom(panic::catch_panic));

    router.layer(middleware)
}
