//! Seam between the orchestrator and the remote generation client.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use vstudio_genai::{GenAiResult, ImagePayload, Operation, VeoClient};
use vstudio_models::{AspectRatio, Resolution};

/// Remote capability that turns a request into a playable asset URL.
///
/// Split into submission and completion so the engine can report the two
/// as distinct phases.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Submit a text-to-video job.
    async fn submit_text(
        &self,
        prompt: String,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> GenAiResult<Operation>;

    /// Submit an image-to-video job. With no prompt, the implementation
    /// substitutes its default instruction.
    async fn submit_image(
        &self,
        image: ImagePayload,
        prompt: Option<String>,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> GenAiResult<Operation>;

    /// Drive a submitted job to completion and return the asset URL.
    async fn await_result(&self, operation: Operation) -> GenAiResult<String>;
}

#[async_trait]
impl VideoGenerator for VeoClient {
    async fn submit_text(
        &self,
        prompt: String,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> GenAiResult<Operation> {
        VeoClient::submit_text(self, &prompt, aspect_ratio, resolution).await
    }

    async fn submit_image(
        &self,
        image: ImagePayload,
        prompt: Option<String>,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> GenAiResult<Operation> {
        VeoClient::submit_image(self, &image, prompt.as_deref(), aspect_ratio, resolution).await
    }

    async fn await_result(&self, operation: Operation) -> GenAiResult<String> {
        VeoClient::await_result(self, operation).await
    }
}
