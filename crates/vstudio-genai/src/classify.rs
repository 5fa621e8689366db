//! Failure classification for opaque remote error text.
//!
//! The remote service exposes no structured error code for an expired or
//! invalid credential; the only available signal is the failure message.
//! The heuristic lives behind a trait so orchestration logic never touches
//! the matching rules directly.

/// What a remote failure message means for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The credential (or a resource it scoped) was rejected; the caller
    /// should drop its authorization state and re-prompt for a key.
    CredentialRejected,
    /// Any other failure.
    Other,
}

/// Maps a remote failure message to a [`FailureKind`].
pub trait FailureClassifier: Send + Sync {
    fn classify(&self, message: &str) -> FailureKind;
}

/// Message signature the remote service produces for rejected credentials.
pub const CREDENTIAL_REJECTED_SIGNATURE: &str = "Requested entity was not found";

/// Default classifier: substring match against known signatures.
#[derive(Debug, Clone)]
pub struct MessageSubstringClassifier {
    signatures: Vec<String>,
}

impl MessageSubstringClassifier {
    pub fn new(signatures: Vec<String>) -> Self {
        Self { signatures }
    }
}

impl Default for MessageSubstringClassifier {
    fn default() -> Self {
        Self::new(vec![CREDENTIAL_REJECTED_SIGNATURE.to_string()])
    }
}

impl FailureClassifier for MessageSubstringClassifier {
    fn classify(&self, message: &str) -> FailureKind {
        if self.signatures.iter().any(|s| message.contains(s.as_str())) {
            FailureKind::CredentialRejected
        } else {
            FailureKind::Other
        }
    }
}
