//! baby-starter
//!
//! A minimal web application starter: an HTTP router, an embedded SQLite
//! store, declarative request validation and a user registration endpoint.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::SqlitePool;
use tracing::info;

use api::state::AppState;
use config::AppConfig;
use infrastructure::storage::{self, run_migrations};
use infrastructure::user::{Argon2Hasher, SqliteUserRepository, UserService};

/// Open the database under the work directory and bring its schema up to date
pub async fn open_database(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let pool = storage::connect(&config.sqlite_config())
        .await
        .context("failed to open database")?;

    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    Ok(pool)
}

/// Build the application state for a configuration
pub async fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let pool = open_database(&config).await?;
    Ok(create_app_state_with_pool(config, pool))
}

/// Build the application state on an already migrated pool
pub fn create_app_state_with_pool(config: AppConfig, pool: SqlitePool) -> AppState {
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let hasher = Arc::new(Argon2Hasher::new());
    let user_service = Arc::new(UserService::new(repository, hasher));

    info!(
        work_dir = %config.work_dir.display(),
        database = %config.database,
        "Application state initialized"
    );

    AppState::new(config, user_service)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::api::create_router;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            work_dir: PathBuf::from(dir).join("data"),
            ..Default::default()
        }
    }

    async fn register(router: &axum::Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/user")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_open_database_creates_file_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let pool = open_database(&config).await.unwrap();
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'users'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(tables, 1);
        assert!(config.database_path().exists());

        // A second startup on the same file is a no-op
        pool.close().await;
        let pool = open_database(&config).await.unwrap();
        pool.close().await;
    }

    #[tokio::test]
    async fn test_registration_against_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let state = create_app_state(config_in(dir.path())).await.unwrap();
        let router = create_router(state);
        let body = json!({"email": "a@b.com", "password": "password1", "name": "Al"});

        let (status, user) = register(&router, body.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["email"], "a@b.com");
        assert_eq!(user["isAdmin"], false);
        assert!(user["password"].as_str().unwrap().starts_with("$argon2id$"));

        let (status, error) = register(&router, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, json!({"error": "User already exists"}));
    }

    #[tokio::test]
    async fn test_open_database_fails_on_unusable_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        let config = AppConfig {
            work_dir: blocker,
            ..Default::default()
        };

        assert!(open_database(&config).await.is_err());
    }
}
