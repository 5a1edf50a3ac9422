//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::validation::ValidationErrors;
use crate::domain::DomainError;

/// Message used for every server-side failure that has no more specific text
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Either a plain message or a map of validation messages
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Message(String),
    Fields(ValidationErrors),
}

/// Error response body, `{"error": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    pub error: ErrorPayload,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ErrorPayload::Message(message.into()),
            },
        }
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Bad request carrying the sanitized validation map
    pub fn invalid_request(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            response: ApiErrorResponse {
                error: ErrorPayload::Fields(errors),
            },
        }
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidRequest(errors) => Self::invalid_request(errors),
            DomainError::Conflict { message } => Self::bad_request(message),
            DomainError::Internal { message } => Self::internal(message),
            // Storage details never leave the process
            DomainError::Storage { .. } => Self::internal(INTERNAL_ERROR_MESSAGE),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.response.error {
            ErrorPayload::Message(message) => write!(f, "{}: {}", self.status, message),
            ErrorPayload::Fields(errors) => write!(f, "{}: {}", self.status, errors),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("User already exists");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "400 Bad Request: User already exists");
    }

    #[test]
    fn test_message_serialization() {
        let err = ApiError::internal("Failed to create user");
        let value = serde_json::to_value(&err.response).unwrap();

        assert_eq!(value, json!({"error": "Failed to create user"}));
    }

    #[test]
    fn test_fields_serialization() {
        let mut errors = ValidationErrors::new();
        errors.add_field("email", vec!["Please provide a valid email address".to_string()]);

        let err = ApiError::invalid_request(errors);
        let value = serde_json::to_value(&err.response).unwrap();

        assert_eq!(
            value["error"]["email"],
            json!(["Please provide a valid email address"])
        );
        assert_eq!(
            value["error"]["$first"],
            json!(["Please provide a valid email address"])
        );
    }

    #[test]
    fn test_domain_error_conversion() {
        let conflict: ApiError = DomainError::conflict("User already exists").into();
        assert_eq!(conflict.status, StatusCode::BAD_REQUEST);

        let internal: ApiError = DomainError::internal("Failed to hash password").into();
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.to_string(), "500 Internal Server Error: Failed to hash password");

        let invalid: ApiError =
            DomainError::invalid_request(ValidationErrors::root("")).into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err: ApiError = DomainError::storage("no such table: users").into();
        let value = serde_json::to_value(&err.response).unwrap();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value, json!({"error": INTERNAL_ERROR_MESSAGE}));
    }

    #[test]
    fn test_all_error_types() {
        assert_eq!(ApiError::bad_request("").status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::internal("").status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
