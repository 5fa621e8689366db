//! Generation orchestrator.
//!
//! The engine drives one generation request at a time through validation,
//! submission, and the completion wait, then appends the result to the
//! persisted history. It owns the volatile authorization flag and exposes
//! the read surface (history, per-style stats, phase) a presentation
//! layer renders from.

pub mod auth;
pub mod engine;
pub mod error;
pub mod generator;
pub mod phase;

pub use auth::AuthState;
pub use engine::{
    GenerateRequest, GenerationEngine, DEFAULT_ASPECT_RATIO, DEFAULT_RESOLUTION,
};
pub use error::{EngineError, EngineResult, GENERIC_FAILURE_MESSAGE};
pub use generator::VideoGenerator;
pub use phase::EnginePhase;
