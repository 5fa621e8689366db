//! Remote video-generation client.
//!
//! This crate wraps the Veo long-running-operation REST surface:
//! - Submit text or image generation jobs
//! - Poll a job handle at a fixed interval until completion
//! - Extract the playable asset URI and append the credential it needs
//! - Classify credential-rejection failures out of opaque error text
//!
//! The remote service reports failures as message text only; the
//! classification heuristic is isolated behind [`FailureClassifier`] so it
//! can be replaced without touching the client.

pub mod auth;
pub mod classify;
pub mod client;
pub mod config;
pub mod data_url;
pub mod error;
pub mod types;

pub use auth::{CredentialProvider, EnvCredentials, StaticCredentials, API_KEY_ENV};
pub use classify::{FailureClassifier, FailureKind, MessageSubstringClassifier};
pub use client::{VeoClient, DEFAULT_IMAGE_PROMPT};
pub use config::{GenAiConfig, PollPolicy, VIDEO_MODEL};
pub use data_url::ImagePayload;
pub use error::{GenAiError, GenAiResult};
pub use types::Operation;
