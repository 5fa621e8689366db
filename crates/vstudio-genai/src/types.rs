//! Wire types for the video-generation REST surface.

use serde::{Deserialize, Serialize};

use vstudio_models::{AspectRatio, Resolution};

use crate::data_url::ImagePayload;

/// Generation job submission.
#[derive(Debug, Serialize)]
pub(crate) struct GenerateVideosRequest {
    pub instances: Vec<Instance>,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
pub(crate) struct Instance {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInstance>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageInstance {
    #[serde(rename = "bytesBase64Encoded")]
    pub bytes_base64_encoded: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl From<&ImagePayload> for ImageInstance {
    fn from(payload: &ImagePayload) -> Self {
        Self {
            bytes_base64_encoded: payload.data.clone(),
            mime_type: payload.mime_type.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerationParameters {
    #[serde(rename = "numberOfVideos")]
    pub number_of_videos: u32,
    pub resolution: Resolution,
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: AspectRatio,
}

/// Opaque handle for an in-progress generation job.
///
/// Returned by submission and refreshed by each poll; carries the
/// completion flag and, once done, the result payload or failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub response: Option<GenerateVideosResponse>,
    #[serde(default)]
    pub error: Option<OperationError>,
}

/// Result payload of a completed job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateVideosResponse {
    #[serde(rename = "generatedVideos", default)]
    pub generated_videos: Vec<GeneratedVideo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedVideo {
    #[serde(default)]
    pub video: Option<VideoAsset>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoAsset {
    #[serde(default)]
    pub uri: Option<String>,
}

/// Failure reported inside a completed operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Operation {
    /// URI of the first generated asset, if any.
    pub fn first_video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generated_videos
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
    }
}
