//! Generation client configuration.

use std::time::Duration;

/// Base URL of the generative-language API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Fixed video model identifier.
pub const VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// How long to wait between job status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default ceiling on poll attempts (about 10 minutes at the default
/// interval).
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 120;

/// How the poll loop waits for a remote job.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Fixed wait between status queries.
    pub interval: Duration,
    /// Maximum number of polls before giving up with a timeout.
    /// `None` waits until the job completes or a query fails.
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: Some(DEFAULT_MAX_POLL_ATTEMPTS),
        }
    }
}

impl PollPolicy {
    /// Poll forever until the job reports done or a query fails.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            ..Default::default()
        }
    }
}

/// Configuration for the generation client.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// Base URL of the generation service.
    pub api_base: String,
    /// Model identifier submitted with every job.
    pub model: String,
    /// Number of assets requested per job; only the first is used.
    pub number_of_videos: u32,
    /// Poll policy for the completion wait.
    pub poll: PollPolicy,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: VIDEO_MODEL.to_string(),
            number_of_videos: 1,
            poll: PollPolicy::default(),
        }
    }
}

impl GenAiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_base: std::env::var("VEO_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            model: std::env::var("VEO_MODEL").unwrap_or_else(|_| VIDEO_MODEL.to_string()),
            number_of_videos: 1,
            poll: PollPolicy {
                interval: Duration::from_secs(
                    std::env::var("VEO_POLL_INTERVAL_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(DEFAULT_POLL_INTERVAL.as_secs()),
                ),
                max_attempts: std::env::var("VEO_POLL_MAX_ATTEMPTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .or(Some(DEFAULT_MAX_POLL_ATTEMPTS)),
            },
        }
    }
}
