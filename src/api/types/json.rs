//! Custom JSON extractor that reports rejections as validation errors

use axum::{
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;
use crate::domain::validation::ValidationErrors;

/// Wrapper around `axum::Json` whose rejection is a 400 carrying a
/// request-level validation error instead of axum's plain-text body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

/// Rejection for bodies that are missing, unreadable or not JSON
#[derive(Debug)]
pub struct JsonRejection {
    reason: String,
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        debug!(reason = %self.reason, "rejected request body");
        ApiError::invalid_request(ValidationErrors::root("")).into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(JsonRejection {
                reason: format_rejection_message(&rejection),
            }),
        }
    }
}

fn format_rejection_message(rejection: &axum::extract::rejection::JsonRejection) -> String {
    use axum::extract::rejection::JsonRejection::*;

    match rejection {
        JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        MissingJsonContentType(_) => "Missing Content-Type header".to_string(),
        BytesRejection(err) => format!("Failed to read request body: {}", err.body_text()),
        _ => "Invalid JSON request".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, StatusCode};
    use serde_json::Value;

    fn request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_extracts_valid_json() {
        let Json(value) = Json::<Value>::from_request(request(r#"{"a":1}"#), &())
            .await
            .unwrap();
        assert_eq!(value["a"], 1);
    }

    #[tokio::test]
    async fn test_syntax_error_becomes_root_issue() {
        let rejection = Json::<Value>::from_request(request("{not json"), &())
            .await
            .unwrap_err();

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["$root"][0], "Invalid request");
        assert_eq!(body["error"]["$first"][0], "Invalid request");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_rejected() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("{}"))
            .unwrap();

        let rejection = Json::<Value>::from_request(req, &()).await.unwrap_err();
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
