// ABOUTME: Shared constants for Jobtrack
// ABOUTME: Document collection names and data directory resolution

use std::env;
use std::path::PathBuf;

/// Top-level collection holding one root document per identity
pub const USERS_COLLECTION: &str = "users";

/// Sub-collection under a user document that holds the settings document
pub const SETTINGS_COLLECTION: &str = "settings";

/// Id of the single settings document inside the settings sub-collection
pub const PREFERENCES_DOCUMENT: &str = "preferences";

/// Get the path to the Jobtrack data directory (~/.jobtrack)
pub fn jobtrack_dir() -> PathBuf {
    // Explicit override first, then HOME (useful for tests)
    if let Ok(dir) = env::var("JOBTRACK_HOME") {
        return PathBuf::from(dir).join(".jobtrack");
    }
    if let Ok(home) = env::var("HOME") {
        return PathBuf::from(home).join(".jobtrack");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".jobtrack")
}

/// Get the path to the default SQLite document database (~/.jobtrack/jobtrack.db)
pub fn default_database_file() -> PathBuf {
    jobtrack_dir().join("jobtrack.db")
}
