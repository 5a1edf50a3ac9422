use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{AppConfig, LogFormat};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl From<&AppConfig> for LoggingConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            level: config.log_level.clone(),
            format: config.log_format,
        }
    }
}

/// `RUST_LOG` wins over the configured level when it parses.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let filter = build_filter(&config.level);

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!("Logging initialized with level: {}", config.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_from_app_config() {
        let app = AppConfig {
            log_level: "debug".to_string(),
            log_format: LogFormat::Json,
            ..Default::default()
        };

        let logging = LoggingConfig::from(&app);
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        };

        init_logging(&config);
        init_logging(&config);
    }
}
