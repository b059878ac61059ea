// ABOUTME: Tracing subscriber initialisation
// ABOUTME: Compact fmt output filtered by RUST_LOG or the configured level

use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `Config::log_level`. Installing twice returns
/// `ConfigError::Logging`.
pub fn init_logging(config: &Config) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths in logs
        .compact()
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))
}
