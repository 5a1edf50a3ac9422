//! Request and response types shared by the handlers

pub mod error;
pub mod json;

pub use error::{ApiError, ApiErrorResponse, ErrorPayload, INTERNAL_ERROR_MESSAGE};
pub use json::Json;
