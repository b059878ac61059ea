// ABOUTME: Configuration and logging setup for Jobtrack
// ABOUTME: Environment-driven config loading plus tracing subscriber initialisation

pub mod config;
pub mod constants;
pub mod logging;

pub use config::{Config, ConfigError, StoreBackend};
pub use logging::init_logging;
