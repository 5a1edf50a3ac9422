//! CLI module
//!
//! Provides subcommands:
//! - `serve`: run the HTTP server (default)
//! - `migrate`: apply database migrations and exit

pub mod migrate;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::AppConfig;
use crate::infrastructure::logging::{self, LoggingConfig};

/// Minimal web application starter with user registration
#[derive(Parser)]
#[command(name = "baby-starter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,
}

impl Cli {
    /// The subcommand to run, `serve` when none was given
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

/// Load `.env`, read the configuration and install logging
pub fn bootstrap() -> anyhow::Result<AppConfig> {
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::load().context("failed to load configuration")?;
    logging::init_logging(&LoggingConfig::from(&config));

    if let Err(e) = dotenv {
        if e.not_found() {
            warn!("no .env file found, using environment and defaults");
        } else {
            warn!(error = %e, "failed to read .env file");
        }
    }

    Ok(config)
}
