//! Local persistence for the generation history.
//!
//! This crate provides:
//! - The write-through, most-recent-first record store
//! - Soft-fail loading of a possibly corrupt history file

pub mod error;
pub mod history;

pub use error::{StoreError, StoreResult};
pub use history::{HistoryStore, HISTORY_FILE_NAME};
