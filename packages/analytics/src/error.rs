// ABOUTME: Error types for parsing aggregate inputs
// ABOUTME: Unknown status names and sort keys

use thiserror::Error;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Unknown application status: {0}")]
    UnknownStatus(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),
}
