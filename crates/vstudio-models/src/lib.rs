//! Shared data models for the VeoStudio core.
//!
//! This crate provides Serde-serializable types for:
//! - The style catalog and effective-prompt composition
//! - Generated-video records and generation enums
//! - Per-style usage statistics

pub mod catalog;
pub mod record;
pub mod stats;

// Re-export common types
pub use catalog::{compose_prompt, find_style, styles, VideoStyle};
pub use record::{
    AspectRatio, AspectRatioParseError, GeneratedVideoRecord, GenerationType, Resolution,
    ResolutionParseError,
};
pub use stats::{usage_by_style, StyleUsage};
