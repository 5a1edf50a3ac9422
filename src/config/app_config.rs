use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

use crate::infrastructure::storage::SqliteConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP bind address, `host:port`
    pub addr: String,
    /// Base directory for persisted files
    pub work_dir: PathBuf,
    /// Informational public base URL
    pub public_url: String,
    /// Database file name, relative to `work_dir`
    pub database: String,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Whether the stored password hash is echoed back on registration
    pub password_in_response: PasswordExposure,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PasswordExposure {
    #[default]
    Hashed,
    Omitted,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            work_dir: PathBuf::from("./.data"),
            public_url: "http://localhost:8080".to_string(),
            database: "database.sqlite3".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            password_in_response: PasswordExposure::default(),
        }
    }
}

impl AppConfig {
    /// Load from optional `config/default` and `config/local` files, then the
    /// process environment (`ADDR`, `WORK_DIR`, `DATABASE`, ...).
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(None)
    }

    /// Same as [`AppConfig::load`] but reads variables from `vars` instead of
    /// the process environment.
    pub fn from_env_map(vars: HashMap<String, String>) -> Result<Self, config::ConfigError> {
        Self::build(Some(vars))
    }

    fn build(vars: Option<HashMap<String, String>>) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let config = config::Config::builder()
            .set_default("addr", defaults.addr)?
            .set_default("work_dir", defaults.work_dir.to_string_lossy().into_owned())?
            .set_default("public_url", defaults.public_url)?
            .set_default("database", defaults.database)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?
            .set_default("password_in_response", "hashed")?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::default().source(vars))
            .build()?;

        config.try_deserialize()
    }

    /// Full path of the database file
    pub fn database_path(&self) -> PathBuf {
        self.work_dir.join(&self.database)
    }

    pub fn sqlite_config(&self) -> SqliteConfig {
        SqliteConfig::new(self.database_path())
    }

    /// Parse `addr`, accepting the `:8080` shorthand for all interfaces
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let addr = if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        };
        addr.parse()
    }
}
