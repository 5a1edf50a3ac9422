//! User endpoints

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::config::PasswordExposure;
use crate::domain::{User, UserId};

/// User as returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_user(user: &User, exposure: PasswordExposure) -> Self {
        let password = match exposure {
            PasswordExposure::Hashed => Some(user.password_hash().to_string()),
            PasswordExposure::Omitted => None,
        };

        Self {
            id: user.id(),
            email: user.email().to_string(),
            password,
            name: user.name().to_string(),
            is_admin: user.is_admin(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// POST /api/user
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.register(&body).await?;

    Ok(Json(UserResponse::from_user(
        &user,
        state.config.password_in_response,
    )))
}
