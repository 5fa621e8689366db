//! Credential access for the generation service.
//!
//! The credential itself is supplied by an external capability (key
//! selection dialog, environment); the client only needs to read the
//! current value right before a request. Whether the credential is
//! currently *valid* is tracked separately by the orchestrator.

use std::sync::RwLock;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Source of the current API credential.
pub trait CredentialProvider: Send + Sync {
    /// The credential to use for the next request, if any is selected.
    fn api_key(&self) -> Option<String>;
}

/// Reads the credential from the environment on every call, so a key
/// selected mid-session is picked up without rebuilding the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialProvider for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())
    }
}

/// In-memory credential slot, settable by a selection dialog integration.
#[derive(Debug, Default)]
pub struct StaticCredentials {
    key: RwLock<Option<String>>,
}

impl StaticCredentials {
    /// Create with a selected key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: RwLock::new(Some(key.into())),
        }
    }

    /// Create with no key selected.
    pub fn none() -> Self {
        Self::default()
    }

    /// Replace the selected key.
    pub fn set(&self, key: impl Into<String>) {
        *self.key.write().unwrap_or_else(|e| e.into_inner()) = Some(key.into());
    }

    /// Drop the selected key.
    pub fn clear(&self) {
        *self.key.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl CredentialProvider for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.key.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
