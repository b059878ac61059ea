// ABOUTME: Runtime configuration loaded from the environment
// ABOUTME: Store backend selection, SQLite location, pool size and log level

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_MAX_CONNECTIONS, DEFAULT_STORE, JOBTRACK_DB_PATH,
    JOBTRACK_LOG_LEVEL, JOBTRACK_MAX_CONNECTIONS, JOBTRACK_STORE, MAX_CONNECTIONS_LIMIT,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid store backend: {0}. Must be one of: memory, sqlite")]
    InvalidBackend(String),
    #[error("Invalid number for {0}: {1}")]
    InvalidNumber(String, ParseIntError),
    #[error("{name} = {value} is out of valid range ({min}-{max})")]
    OutOfRange {
        name: String,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Memory, // Process-local, lost on exit
    Sqlite, // File-backed document table
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "sqlite" => Ok(StoreBackend::Sqlite),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            database_path: jobtrack_core::default_database_file(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_backend = env::var(JOBTRACK_STORE)
            .unwrap_or_else(|_| DEFAULT_STORE.to_string())
            .parse::<StoreBackend>()?;

        let database_path = env::var(JOBTRACK_DB_PATH)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(jobtrack_core::default_database_file);

        let max_connections = match env::var(JOBTRACK_MAX_CONNECTIONS) {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidNumber(JOBTRACK_MAX_CONNECTIONS.to_string(), e))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        // Validate pool size is in valid range
        if max_connections == 0 || max_connections > MAX_CONNECTIONS_LIMIT {
            return Err(ConfigError::OutOfRange {
                name: JOBTRACK_MAX_CONNECTIONS.to_string(),
                value: max_connections,
                min: 1,
                max: MAX_CONNECTIONS_LIMIT,
            });
        }

        let log_level =
            env::var(JOBTRACK_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(Config {
            store_backend,
            database_path,
            max_connections,
            log_level,
        })
    }
}
