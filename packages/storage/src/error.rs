// ABOUTME: Error types for document store operations
// ABOUTME: Every error exposes a stable code so callers can log code and message

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Stable machine-readable code for logs and user-facing messages
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::PermissionDenied(_) => "permission-denied",
            StoreError::Unavailable(_) => "unavailable",
            StoreError::NotFound(_) => "not-found",
            StoreError::InvalidPath(_) | StoreError::InvalidDocument(_) => "invalid-argument",
            StoreError::Sqlx(err) => match err {
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                    "unavailable"
                }
                _ => "internal",
            },
            StoreError::Io(_) => "unavailable",
            StoreError::Migration(_) | StoreError::Json(_) => "internal",
        }
    }
}
