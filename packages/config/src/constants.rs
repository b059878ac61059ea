// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Jobtrack

// Document Store Configuration
pub const JOBTRACK_STORE: &str = "JOBTRACK_STORE";
pub const JOBTRACK_DB_PATH: &str = "JOBTRACK_DB_PATH";
pub const JOBTRACK_MAX_CONNECTIONS: &str = "JOBTRACK_MAX_CONNECTIONS";

// Logging
pub const JOBTRACK_LOG_LEVEL: &str = "JOBTRACK_LOG_LEVEL";
pub const RUST_LOG: &str = "RUST_LOG";

// Data Directory
pub const JOBTRACK_HOME: &str = "JOBTRACK_HOME";

// System Environment Variables
pub const HOME: &str = "HOME";

// Defaults
pub const DEFAULT_STORE: &str = "memory";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const MAX_CONNECTIONS_LIMIT: u32 = 64;
