//! SQLite connection pool for the embedded database file

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::domain::DomainError;

/// SQLite storage configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path of the database file
    pub path: PathBuf,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    pub connect_timeout_secs: u64,
    /// How long a writer waits on a locked database, in seconds
    pub busy_timeout_secs: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./.data/database.sqlite3"),
            max_connections: 5,
            connect_timeout_secs: 30,
            busy_timeout_secs: 5,
        }
    }
}

impl SqliteConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// Open (creating if needed) the database file and its parent directory
pub async fn connect(config: &SqliteConfig) -> Result<SqlitePool, DomainError> {
    if let Some(dir) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(dir).await?;
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(options)
        .await
        .map_err(|e| {
            DomainError::storage(format!(
                "Failed to open database {}: {}",
                config.path.display(),
                e
            ))
        })?;

    info!(path = %config.path.display(), "database opened");

    Ok(pool)
}

/// Open a private in-memory database.
///
/// Every connection to `sqlite::memory:` sees its own database, so the pool
/// holds exactly one connection and never recycles it.
pub async fn connect_in_memory() -> Result<SqlitePool, DomainError> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .map_err(|e| DomainError::storage(format!("Failed to open in-memory database: {}", e)))
}

async fn ensure_dir(dir: &Path) -> Result<(), DomainError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        DomainError::storage(format!(
            "Failed to create work directory {}: {}",
            dir.display(),
            e
        ))
    })
}
