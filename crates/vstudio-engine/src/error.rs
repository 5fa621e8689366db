//! Engine error types.

use thiserror::Error;

use vstudio_genai::GenAiError;
use vstudio_store::StoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Fallback shown when a remote failure carries no message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong during generation.";

#[derive(Debug, Error)]
pub enum EngineError {
    /// Text mode with an empty prompt after trimming.
    #[error("Please enter a text prompt.")]
    EmptyPrompt,

    /// Image mode without an uploaded image.
    #[error("Please upload an image.")]
    MissingImage,

    /// Another request is already in flight.
    #[error("A generation is already in progress.")]
    Busy,

    /// No credential selected, or the remote service rejected it.
    #[error("API key invalid or expired. Please select a project again.")]
    NotAuthorized,

    /// Submission or polling failed for any other reason.
    #[error("{0}")]
    Generation(GenAiError),

    /// The record could not be persisted.
    #[error("Failed to save history: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// The single human-readable message reported to the caller.
    ///
    /// Remote failures pass their message through verbatim; an empty one
    /// falls back to the fixed generic string.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::Generation(source) => {
                let message = source.to_string();
                if message.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message
                }
            }
            other => other.to_string(),
        }
    }
}
