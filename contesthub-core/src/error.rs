//! Error types for contesthub.

use thiserror::Error;

/// Errors that can occur in contesthub operations.
#[derive(Error, Debug)]
pub enum ContestHubError {
    #[error("Invalid contest record '{id}': {reason}")]
    InvalidContestRecord { id: String, reason: String },

    #[error("Unsupported calendar provider '{0}' (expected google, outlook or apple)")]
    UnsupportedProvider(String),

    #[error("Notifications unavailable: {0}")]
    NotificationUnavailable(String),

    #[error("Contest '{0}' is not visible")]
    ContestNotVisible(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),
}

impl ContestHubError {
    pub(crate) fn invalid_record(id: impl Into<String>, reason: impl Into<String>) -> Self {
        ContestHubError::InvalidContestRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for contesthub operations.
pub type ContestHubResult<T> = Result<T, ContestHubError>;
