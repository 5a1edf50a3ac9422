use std::any::Any;

use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::api::types::{ApiError, INTERNAL_ERROR_MESSAGE};

/// Turn a handler panic into a generic 500 response
#[tracing::instrument(skip_all, name = "middleware.catch_panic")]
pub fn catch_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "<unknown>".into()
    };

    error!(panic = %message, "route handler panicked");
    ApiError::internal(INTERNAL_ERROR_MESSAGE).into_response()
}
