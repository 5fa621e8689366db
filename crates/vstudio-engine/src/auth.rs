//! Volatile authorization state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Whether a valid credential is currently selected.
///
/// Re-derived at every session start from the external authorization
/// capability and never persisted. Set optimistically after a successful
/// selection dialog; cleared when the remote service rejects the
/// credential mid-flight. Cheap to clone and share with the UI layer.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    authorized: Arc<AtomicBool>,
}

impl AuthState {
    /// Create from the startup credential query.
    pub fn new(authorized: bool) -> Self {
        Self {
            authorized: Arc::new(AtomicBool::new(authorized)),
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    pub fn set_authorized(&self, authorized: bool) {
        self.authorized.store(authorized, Ordering::SeqCst);
    }

    /// A selection dialog completed; assume the credential is valid until
    /// the remote service says otherwise.
    pub fn mark_selected(&self) {
        self.set_authorized(true);
    }
}
