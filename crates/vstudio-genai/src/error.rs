//! Generation client error types.

use thiserror::Error;

/// Result type for generation client operations.
pub type GenAiResult<T> = Result<T, GenAiError>;

#[derive(Debug, Error)]
pub enum GenAiError {
    /// Credential missing up front, or rejected by the remote service.
    #[error("{0}")]
    NotAuthorized(String),

    /// The remote job completed without a usable asset reference.
    #[error("Failed to generate video: No URI returned.")]
    NoAssetReturned,

    /// The bounded poll policy ran out of attempts.
    #[error("Generation timed out after {0} poll attempts")]
    Timeout(u32),

    /// Any other submission or polling failure, message passed through.
    #[error("{0}")]
    Remote(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenAiError {
    pub fn not_authorized(msg: impl Into<String>) -> Self {
        Self::NotAuthorized(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    /// Missing credential before any network call.
    pub fn missing_credential() -> Self {
        Self::NotAuthorized("API Key not found. Please select a key.".to_string())
    }
}
