//! Generation phases published to downstream consumers.

use serde::Serialize;
use std::fmt;

/// Where the engine currently is in handling a request.
///
/// Each `generate` call starts the machine fresh from validation; after a
/// call the phase rests at `Completed` or `Failed` until the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnginePhase {
    /// No request handled yet.
    #[default]
    Idle,
    /// Checking authorization and input.
    Validating,
    /// Submitting the job to the generation service.
    Submitting,
    /// Waiting for the remote job to complete.
    Polling,
    /// The last request produced a record.
    Completed,
    /// The last request failed.
    Failed,
}

impl EnginePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnginePhase::Idle => "idle",
            EnginePhase::Validating => "validating",
            EnginePhase::Submitting => "submitting",
            EnginePhase::Polling => "polling",
            EnginePhase::Completed => "completed",
            EnginePhase::Failed => "failed",
        }
    }

    /// Whether the last request has finished, one way or the other.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EnginePhase::Completed | EnginePhase::Failed)
    }
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
