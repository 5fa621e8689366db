//! Veo generation client.
//!
//! Submission and polling share one protocol: read the current
//! credential, call the service, and run any failure text through the
//! classifier so credential rejections are recognizable. The poll loop is
//! the only completion-wait mechanism; it never re-queries a handle that
//! already reported done.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use vstudio_models::{AspectRatio, Resolution};

use crate::auth::{CredentialProvider, EnvCredentials};
use crate::classify::{FailureClassifier, FailureKind, MessageSubstringClassifier};
use crate::config::GenAiConfig;
use crate::data_url::ImagePayload;
use crate::error::{GenAiError, GenAiResult};
use crate::types::{
    GenerateVideosRequest, GenerationParameters, ImageInstance, Instance, Operation,
    OperationError,
};

/// Instruction substituted when an image request carries no prompt.
pub const DEFAULT_IMAGE_PROMPT: &str = "Animate this image";

/// Client for the video-generation service.
pub struct VeoClient {
    http: Client,
    config: GenAiConfig,
    credentials: Arc<dyn CredentialProvider>,
    classifier: Arc<dyn FailureClassifier>,
}

impl VeoClient {
    /// Create a new client with the default failure classifier.
    pub fn new(config: GenAiConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            http: Client::new(),
            config,
            credentials,
            classifier: Arc::new(MessageSubstringClassifier::default()),
        }
    }

    /// Create from environment variables, reading the credential from the
    /// environment on every request.
    pub fn from_env() -> Self {
        Self::new(GenAiConfig::from_env(), Arc::new(EnvCredentials))
    }

    /// Replace the failure classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn FailureClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Submit a text-to-video job.
    pub async fn submit_text(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> GenAiResult<Operation> {
        info!(model = %self.config.model, %aspect_ratio, %resolution, "Submitting text-to-video job");

        self.submit(
            Instance {
                prompt: prompt.to_string(),
                image: None,
            },
            aspect_ratio,
            resolution,
        )
        .await
    }

    /// Submit an image-to-video job.
    ///
    /// A missing or blank prompt is replaced with the fixed default
    /// instruction.
    pub async fn submit_image(
        &self,
        image: &ImagePayload,
        prompt: Option<&str>,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> GenAiResult<Operation> {
        let prompt = match prompt {
            Some(p) if !p.trim().is_empty() => p,
            _ => DEFAULT_IMAGE_PROMPT,
        };

        info!(
            model = %self.config.model,
            mime_type = %image.mime_type,
            %aspect_ratio,
            %resolution,
            "Submitting image-to-video job"
        );

        self.submit(
            Instance {
                prompt: prompt.to_string(),
                image: Some(ImageInstance::from(image)),
            },
            aspect_ratio,
            resolution,
        )
        .await
    }

    /// Wait for a submitted job and return the playable asset URL.
    ///
    /// While the job is not done, suspends for the configured interval and
    /// re-queries the handle; a bounded policy gives up with `Timeout`. On
    /// completion the first asset URI is returned with the current
    /// credential appended, since the asset endpoint requires it too.
    pub async fn await_result(&self, mut operation: Operation) -> GenAiResult<String> {
        let mut attempts: u32 = 0;

        while !operation.done {
            if let Some(max) = self.config.poll.max_attempts {
                if attempts >= max {
                    warn!(operation = %operation.name, attempts, "Gave up waiting for generation job");
                    return Err(GenAiError::Timeout(attempts));
                }
            }
            attempts += 1;

            tokio::time::sleep(self.config.poll.interval).await;
            operation = self.poll(&operation.name).await?;
        }

        if let Some(error) = operation.error.take() {
            return Err(self.operation_failure(error));
        }

        let uri = operation
            .first_video_uri()
            .ok_or(GenAiError::NoAssetReturned)?;

        let key = self.api_key()?;
        Ok(with_credential(uri, &key))
    }

    /// Generate a video from a text prompt and return the asset URL.
    pub async fn generate_from_text(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> GenAiResult<String> {
        let operation = self.submit_text(prompt, aspect_ratio, resolution).await?;
        self.await_result(operation).await
    }

    /// Generate a video from an uploaded image and return the asset URL.
    pub async fn generate_from_image(
        &self,
        image: &ImagePayload,
        prompt: Option<&str>,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> GenAiResult<String> {
        let operation = self
            .submit_image(image, prompt, aspect_ratio, resolution)
            .await?;
        self.await_result(operation).await
    }

    fn api_key(&self) -> GenAiResult<String> {
        self.credentials
            .api_key()
            .ok_or_else(GenAiError::missing_credential)
    }

    async fn submit(
        &self,
        instance: Instance,
        aspect_ratio: AspectRatio,
        resolution: Resolution,
    ) -> GenAiResult<Operation> {
        let key = self.api_key()?;
        let url = format!(
            "{}/v1beta/models/{}:predictLongRunning?key={}",
            self.config.api_base, self.config.model, key
        );

        let request = GenerateVideosRequest {
            instances: vec![instance],
            parameters: GenerationParameters {
                number_of_videos: self.config.number_of_videos,
                resolution,
                aspect_ratio,
            },
        };

        let response = self.http.post(&url).json(&request).send().await?;
        self.parse_operation(response).await
    }

    async fn poll(&self, name: &str) -> GenAiResult<Operation> {
        let key = self.api_key()?;
        let url = format!("{}/v1beta/{}?key={}", self.config.api_base, name, key);

        debug!(operation = %name, "Polling job status");

        let response = self.http.get(&url).send().await?;
        self.parse_operation(response).await
    }

    async fn parse_operation(&self, response: reqwest::Response) -> GenAiResult<Operation> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(self.remote_failure(status, body));
        }

        Ok(response.json::<Operation>().await?)
    }

    fn remote_failure(&self, status: StatusCode, body: String) -> GenAiError {
        match self.classifier.classify(&body) {
            FailureKind::CredentialRejected => {
                warn!(%status, "Credential rejected by generation service");
                GenAiError::not_authorized(body)
            }
            FailureKind::Other => {
                GenAiError::remote(format!("Generation service returned {}: {}", status, body))
            }
        }
    }

    fn operation_failure(&self, error: OperationError) -> GenAiError {
        let message = error.message.unwrap_or_default();
        match self.classifier.classify(&message) {
            FailureKind::CredentialRejected => {
                warn!("Credential rejected by generation service");
                GenAiError::not_authorized(message)
            }
            FailureKind::Other => GenAiError::remote(message),
        }
    }
}

/// Append the credential as a query parameter of the asset URI.
fn with_credential(uri: &str, key: &str) -> String {
    match Url::parse(uri) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("key", key);
            url.to_string()
        }
        // Relative or otherwise unparsable reference: append by hand.
        Err(_) => {
            let separator = if uri.contains('?') { '&' } else { '?' };
            format!("{}{}key={}", uri, separator, key)
        }
    }
}
