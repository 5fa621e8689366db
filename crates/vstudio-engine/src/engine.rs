//! The generation engine.

use tokio::sync::{watch, Semaphore};
use tracing::{info, warn};

use vstudio_genai::{GenAiError, ImagePayload};
use vstudio_models::{
    compose_prompt, styles, usage_by_style, AspectRatio, GeneratedVideoRecord, GenerationType,
    Resolution, StyleUsage,
};
use vstudio_store::HistoryStore;

use crate::auth::AuthState;
use crate::error::{EngineError, EngineResult};
use crate::generator::VideoGenerator;
use crate::phase::EnginePhase;

/// Aspect ratio used for every request; not user-selectable yet.
pub const DEFAULT_ASPECT_RATIO: AspectRatio = AspectRatio::Widescreen;

/// Resolution used for every request; not user-selectable yet.
pub const DEFAULT_RESOLUTION: Resolution = Resolution::Hd720;

/// One generation request from the input form.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub kind: GenerationType,
    /// Raw prompt text; persisted as-is, without the style modifier.
    pub prompt: String,
    /// Uploaded image, required for image-to-video requests.
    pub image: Option<ImagePayload>,
    /// Selected style id; an id absent from the catalog applies no
    /// modifier.
    pub style_id: String,
}

impl GenerateRequest {
    /// A text-to-video request.
    pub fn text(prompt: impl Into<String>, style_id: impl Into<String>) -> Self {
        Self {
            kind: GenerationType::TextToVideo,
            prompt: prompt.into(),
            image: None,
            style_id: style_id.into(),
        }
    }

    /// An image-to-video request; the prompt may be empty.
    pub fn image(
        image: ImagePayload,
        prompt: impl Into<String>,
        style_id: impl Into<String>,
    ) -> Self {
        Self {
            kind: GenerationType::ImageToVideo,
            prompt: prompt.into(),
            image: Some(image),
            style_id: style_id.into(),
        }
    }
}

/// Orchestrates one generation at a time: validate, submit, wait, persist.
pub struct GenerationEngine<G: VideoGenerator> {
    generator: G,
    store: HistoryStore,
    auth: AuthState,
    slot: Semaphore,
    phase: watch::Sender<EnginePhase>,
}

impl<G: VideoGenerator> GenerationEngine<G> {
    pub fn new(generator: G, store: HistoryStore, auth: AuthState) -> Self {
        let (phase, _) = watch::channel(EnginePhase::Idle);
        Self {
            generator,
            store,
            auth,
            slot: Semaphore::new(1),
            phase,
        }
    }

    /// The volatile authorization flag, shared with the UI layer.
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// Watch the engine move through its phases.
    pub fn subscribe_phase(&self) -> watch::Receiver<EnginePhase> {
        self.phase.subscribe()
    }

    /// The persisted history, most recent first.
    pub async fn history(&self) -> Vec<GeneratedVideoRecord> {
        self.store.all().await
    }

    /// Per-style generation counts for the stats view.
    pub async fn style_usage(&self) -> Vec<StyleUsage> {
        usage_by_style(&self.store.all().await, styles())
    }

    /// Run one generation request to completion.
    ///
    /// Only one request may be in flight; a concurrent call fails with
    /// `Busy` immediately. A credential rejection clears the
    /// authorization flag before the error is returned. No failure is
    /// fatal — the engine accepts the next request either way.
    pub async fn generate(&self, request: GenerateRequest) -> EngineResult<GeneratedVideoRecord> {
        let _slot = self.slot.try_acquire().map_err(|_| EngineError::Busy)?;

        match self.run(request).await {
            Ok(record) => {
                self.set_phase(EnginePhase::Completed);
                Ok(record)
            }
            Err(error) => {
                self.set_phase(EnginePhase::Failed);
                Err(error)
            }
        }
    }

    async fn run(&self, request: GenerateRequest) -> EngineResult<GeneratedVideoRecord> {
        let GenerateRequest {
            kind,
            prompt,
            image,
            style_id,
        } = request;

        self.set_phase(EnginePhase::Validating);

        if !self.auth.is_authorized() {
            return Err(EngineError::NotAuthorized);
        }

        let has_prompt = !prompt.trim().is_empty();
        match kind {
            GenerationType::TextToVideo if !has_prompt => return Err(EngineError::EmptyPrompt),
            GenerationType::ImageToVideo if image.is_none() => {
                return Err(EngineError::MissingImage)
            }
            _ => {}
        }

        // An empty image prompt is passed through as absent so the client
        // substitutes its default instruction.
        let effective = has_prompt.then(|| compose_prompt(&prompt, &style_id));

        self.set_phase(EnginePhase::Submitting);
        let operation = match kind {
            GenerationType::TextToVideo => {
                self.generator
                    .submit_text(
                        effective.unwrap_or_default(),
                        DEFAULT_ASPECT_RATIO,
                        DEFAULT_RESOLUTION,
                    )
                    .await
            }
            GenerationType::ImageToVideo => {
                let image = image.ok_or(EngineError::MissingImage)?;
                self.generator
                    .submit_image(image, effective, DEFAULT_ASPECT_RATIO, DEFAULT_RESOLUTION)
                    .await
            }
        }
        .map_err(|e| self.generation_failure(e))?;

        self.set_phase(EnginePhase::Polling);
        let url = self
            .generator
            .await_result(operation)
            .await
            .map_err(|e| self.generation_failure(e))?;

        let record = GeneratedVideoRecord::new(
            url,
            prompt,
            style_id,
            kind,
            DEFAULT_ASPECT_RATIO,
            DEFAULT_RESOLUTION,
        );
        self.store.append(record.clone()).await?;

        info!(
            record_id = %record.id,
            kind = %record.kind,
            style = %record.style,
            "Generation completed"
        );
        Ok(record)
    }

    fn generation_failure(&self, error: GenAiError) -> EngineError {
        match error {
            GenAiError::NotAuthorized(message) => {
                warn!(%message, "Credential rejected, revoking authorization");
                self.auth.set_authorized(false);
                EngineError::NotAuthorized
            }
            other => EngineError::Generation(other),
        }
    }

    fn set_phase(&self, phase: EnginePhase) {
        self.phase.send_replace(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MockVideoGenerator;
    use vstudio_genai::Operation;

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    }

    fn pending_operation() -> Operation {
        Operation {
            name: "operations/op-1".to_string(),
            ..Default::default()
        }
    }

    async fn engine_with(
        generator: MockVideoGenerator,
        authorized: bool,
        dir: &std::path::Path,
    ) -> GenerationEngine<MockVideoGenerator> {
        init_logging();
        let store = HistoryStore::load(dir).await;
        GenerationEngine::new(generator, store, AuthState::new(authorized))
    }

    #[tokio::test]
    async fn test_text_generation_appends_record_with_original_prompt() {
        let dir = tempfile::tempdir().unwrap();

        let mut generator = MockVideoGenerator::new();
        generator
            .expect_submit_text()
            .withf(|prompt, aspect, resolution| {
                prompt == "a cat. Style: anime style, studio ghibli, vibrant colors, cell shaded, high quality animation"
                    && *aspect == AspectRatio::Widescreen
                    && *resolution == Resolution::Hd720
            })
            .times(1)
            .returning(|_, _, _| Ok(pending_operation()));
        generator
            .expect_await_result()
            .times(1)
            .returning(|_| Ok("https://x/y?key=test-key".to_string()));

        let engine = engine_with(generator, true, dir.path()).await;
        let record = engine
            .generate(GenerateRequest::text("a cat", "anime"))
            .await
            .unwrap();

        // The record keeps the raw prompt, not the composed one.
        assert_eq!(record.prompt, "a cat");
        assert_eq!(record.style, "anime");
        assert_eq!(record.kind, GenerationType::TextToVideo);
        assert_eq!(record.aspect_ratio, AspectRatio::Widescreen);
        assert_eq!(record.resolution, Resolution::Hd720);
        assert!(record.url.contains("key="));

        let history = engine.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], record);
        assert_eq!(*engine.subscribe_phase().borrow(), EnginePhase::Completed);
    }

    #[tokio::test]
    async fn test_empty_prompt_never_reaches_generator() {
        let dir = tempfile::tempdir().unwrap();

        let mut generator = MockVideoGenerator::new();
        generator.expect_submit_text().times(0);
        generator.expect_submit_image().times(0);

        let engine = engine_with(generator, true, dir.path()).await;
        let err = engine
            .generate(GenerateRequest::text("   ", "anime"))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::EmptyPrompt));
        assert_eq!(err.user_message(), "Please enter a text prompt.");
        assert_eq!(*engine.subscribe_phase().borrow(), EnginePhase::Failed);
    }

    #[tokio::test]
    async fn test_image_mode_requires_an_image() {
        let dir = tempfile::tempdir().unwrap();

        let mut generator = MockVideoGenerator::new();
        generator.expect_submit_image().times(0);

        let engine = engine_with(generator, true, dir.path()).await;
        let mut request = GenerateRequest::text("animate me", "anime");
        request.kind = GenerationType::ImageToVideo;

        let err = engine.generate(request).await.unwrap_err();
        assert!(matches!(err, EngineError::MissingImage));
        assert_eq!(err.user_message(), "Please upload an image.");
    }

    #[tokio::test]
    async fn test_unauthorized_precondition_blocks_generation() {
        let dir = tempfile::tempdir().unwrap();

        let mut generator = MockVideoGenerator::new();
        generator.expect_submit_text().times(0);

        let engine = engine_with(generator, false, dir.path()).await;
        let err = engine
            .generate(GenerateRequest::text("a cat", "anime"))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::NotAuthorized));
    }

    #[tokio::test]
    async fn test_credential_rejection_revokes_authorization() {
        let dir = tempfile::tempdir().unwrap();

        let mut generator = MockVideoGenerator::new();
        generator
            .expect_submit_text()
            .returning(|_, _, _| Ok(pending_operation()));
        generator.expect_await_result().returning(|_| {
            Err(GenAiError::not_authorized(
                "Requested entity was not found: projects/p1",
            ))
        });

        let engine = engine_with(generator, true, dir.path()).await;
        let err = engine
            .generate(GenerateRequest::text("a cat", "anime"))
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::NotAuthorized));
        assert_eq!(
            err.user_message(),
            "API key invalid or expired. Please select a project again."
        );
        assert!(!engine.auth().is_authorized());
        assert!(engine.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_other_failures_leave_authorization_untouched() {
        let dir = tempfile::tempdir().unwrap();

        let mut generator = MockVideoGenerator::new();
        generator
            .expect_submit_text()
            .returning(|_, _, _| Ok(pending_operation()));
        generator
            .expect_await_result()
            .returning(|_| Err(GenAiError::remote("quota exceeded")));

        let engine = engine_with(generator, true, dir.path()).await;
        let err = engine
            .generate(GenerateRequest::text("a cat", "anime"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "quota exceeded");
        assert!(engine.auth().is_authorized());
        assert!(engine.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_image_mode_with_empty_prompt_defers_to_client_default() {
        let dir = tempfile::tempdir().unwrap();

        let mut generator = MockVideoGenerator::new();
        generator
            .expect_submit_image()
            .withf(|image, prompt, _, _| image.mime_type == "image/png" && prompt.is_none())
            .times(1)
            .returning(|_, _, _, _| Ok(pending_operation()));
        generator
            .expect_await_result()
            .returning(|_| Ok("https://x/y?key=k".to_string()));

        let engine = engine_with(generator, true, dir.path()).await;
        let image = ImagePayload::from_data_url("data:image/png;base64,AAAA");
        let record = engine
            .generate(GenerateRequest::image(image, "", "anime"))
            .await
            .unwrap();

        // The stored prompt stays the empty original, not the default.
        assert_eq!(record.prompt, "");
        assert_eq!(record.kind, GenerationType::ImageToVideo);
    }

    #[tokio::test]
    async fn test_styled_image_prompt_is_composed() {
        let dir = tempfile::tempdir().unwrap();

        let mut generator = MockVideoGenerator::new();
        generator
            .expect_submit_image()
            .withf(|_, prompt, _, _| {
                prompt.as_deref()
                    == Some("make it move. Style: cyberpunk, neon lights, futuristic city, rain, high tech, blade runner style")
            })
            .times(1)
            .returning(|_, _, _, _| Ok(pending_operation()));
        generator
            .expect_await_result()
            .returning(|_| Ok("https://x/y?key=k".to_string()));

        let engine = engine_with(generator, true, dir.path()).await;
        let image = ImagePayload::new("AAAA", "image/png");
        let record = engine
            .generate(GenerateRequest::image(image, "make it move", "cyberpunk"))
            .await
            .unwrap();

        assert_eq!(record.prompt, "make it move");
    }

    #[tokio::test]
    async fn test_second_call_while_in_flight_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let generator = MockVideoGenerator::new();
        let engine = engine_with(generator, true, dir.path()).await;

        // Hold the single slot as an in-flight request would.
        let _slot = engine.slot.try_acquire().unwrap();

        let err = engine
            .generate(GenerateRequest::text("a cat", "anime"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Busy));
    }

    #[tokio::test]
    async fn test_style_usage_follows_catalog_order() {
        let dir = tempfile::tempdir().unwrap();

        let mut generator = MockVideoGenerator::new();
        generator
            .expect_submit_text()
            .returning(|_, _, _| Ok(pending_operation()));
        generator
            .expect_await_result()
            .returning(|_| Ok("https://x/y?key=k".to_string()));

        let engine = engine_with(generator, true, dir.path()).await;
        for style in ["anime", "anime", "realistic"] {
            engine
                .generate(GenerateRequest::text("a cat", style))
                .await
                .unwrap();
        }

        let usage = engine.style_usage().await;
        assert_eq!(usage.len(), 2);
        // Catalog order: realistic before anime, despite fewer records.
        assert_eq!(usage[0].style, "Realistic");
        assert_eq!(usage[0].count, 1);
        assert_eq!(usage[1].style, "Anime");
        assert_eq!(usage[1].count, 2);
    }

    #[tokio::test]
    async fn test_unknown_style_passes_prompt_through_unchanged() {
        let dir = tempfile::tempdir().unwrap();

        let mut generator = MockVideoGenerator::new();
        generator
            .expect_submit_text()
            .withf(|prompt, _, _| prompt == "a cat")
            .times(1)
            .returning(|_, _, _| Ok(pending_operation()));
        generator
            .expect_await_result()
            .returning(|_| Ok("https://x/y?key=k".to_string()));

        let engine = engine_with(generator, true, dir.path()).await;
        let record = engine
            .generate(GenerateRequest::text("a cat", "claymation"))
            .await
            .unwrap();

        assert_eq!(record.style, "claymation");
    }
}
