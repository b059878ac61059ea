// ABOUTME: Error types for settings operations
// ABOUTME: Wraps store, validation and serialization failures with stable codes

use jobtrack_storage::StoreError;
use thiserror::Error;

use crate::validation::ValidationError;

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid settings document: {0}")]
    InvalidDocument(String),

    #[error("Unknown settings section: {0}")]
    UnknownSection(String),

    #[error("Invalid patch for {section}: {reason}")]
    InvalidPatch { section: String, reason: String },
}

impl SettingsError {
    /// Machine-readable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            SettingsError::NotAuthenticated => "unauthenticated",
            SettingsError::Store(e) => e.code(),
            SettingsError::Validation(_)
            | SettingsError::UnknownSection(_)
            | SettingsError::InvalidPatch { .. } => "invalid-argument",
            SettingsError::Serialization(_) | SettingsError::InvalidDocument(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_codes_pass_through() {
        let err = SettingsError::from(StoreError::PermissionDenied("users/u1".to_string()));
        assert_eq!(err.code(), "permission-denied");
    }

    #[test]
    fn test_validation_is_invalid_argument() {
        let err = SettingsError::from(ValidationError::InvalidInteger(
            "followUpDays".to_string(),
            "0".to_string(),
            "Must be >= 1".to_string(),
        ));
        assert_eq!(err.code(), "invalid-argument");
        assert_eq!(
            err.to_string(),
            "Invalid integer value for followUpDays: 0. Must be >= 1"
        );
    }
}
