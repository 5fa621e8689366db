//! Generated-video records and generation enums.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Kind of generation request a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationType {
    TextToVideo,
    ImageToVideo,
}

impl GenerationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationType::TextToVideo => "TEXT_TO_VIDEO",
            GenerationType::ImageToVideo => "IMAGE_TO_VIDEO",
        }
    }
}

impl fmt::Display for GenerationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output aspect ratio supported by the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum AspectRatio {
    /// Landscape 16:9
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    /// Portrait 9:16
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "16:9" => Ok(AspectRatio::Widescreen),
            "9:16" => Ok(AspectRatio::Portrait),
            _ => Err(AspectRatioParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unsupported aspect ratio: {0}")]
pub struct AspectRatioParseError(String);

/// Output resolution supported by the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum Resolution {
    #[default]
    #[serde(rename = "720p")]
    Hd720,
    #[serde(rename = "1080p")]
    Hd1080,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Hd720 => "720p",
            Resolution::Hd1080 => "1080p",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ResolutionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "720p" => Ok(Resolution::Hd720),
            "1080p" => Ok(Resolution::Hd1080),
            _ => Err(ResolutionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unsupported resolution: {0}")]
pub struct ResolutionParseError(String);

/// One completed generation, as persisted in the local history.
///
/// Created only on successful generation and never mutated afterwards.
/// `style` references a catalog entry for display, but the record stays
/// valid if that entry disappears. Field names and the millisecond
/// timestamp match the persisted history format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVideoRecord {
    /// Unique, time-ordered id.
    pub id: String,

    /// Playable asset reference. May embed a transient credential.
    pub url: String,

    /// The user's original prompt text, possibly empty.
    pub prompt: String,

    /// Style id selected at generation time.
    pub style: String,

    /// Creation timestamp, persisted as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schemars(with = "i64")]
    pub created_at: DateTime<Utc>,

    /// Generation kind.
    #[serde(rename = "type")]
    pub kind: GenerationType,

    /// Aspect ratio the asset was rendered at.
    pub aspect_ratio: AspectRatio,

    /// Resolution the asset was rendered at.
    pub resolution: Resolution,
}

impl GeneratedVideoRecord {
    /// Create a new record with a fresh id and the current timestamp.
    pub fn new(
        url: impl Into<String>,
        prompt: impl Into<String>,
        style: impl Into<String>,
        kind: GenerationType,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> Self {
        // Truncate to the millisecond precision of the persisted format so
        // a record compares equal across a save/load round trip.
        let now = Utc::now();
        let created_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);

        Self {
            id: Uuid::now_v7().to_string(),
            url: url.into(),
            prompt: prompt.into(),
            style: style.into(),
            created_at,
            kind,
            aspect_ratio,
            resolution,
        }
    }
}
