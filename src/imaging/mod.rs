pub mod default;
pub mod remote_ai;
pub mod stock;
pub mod synthetic;

use crate::{
    config::ImageConfig,
    content::{classifier::classify, seed::remote_seed},
    error::{InstaGenError, Result},
    logger,
    models::{ImageReference, ImageResult, ImageSource, Style},
};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub use default::DefaultImageStage;
pub use remote_ai::RemoteAiStage;
pub use stock::StockPhotoStage;
pub use synthetic::SyntheticStage;

/// One step of the image fallback chain.
#[async_trait]
pub trait ImageStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn source(&self) -> ImageSource;

    /// Per-stage deadline; `None` uses the resolver's default.
    fn timeout(&self) -> Option<Duration> {
        None
    }

    async fn attempt(&self, prompt: &str, style: Style, seed: u64) -> Result<ImageReference>;
}

/// Why a stage was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct StageFailure {
    pub stage: &'static str,
    pub source: ImageSource,
    pub reason: String,
}

/// Ordered image fallback coordinator. The first stage to succeed wins.
#[derive(Clone)]
pub struct ImageResolver {
    stages: Vec<Arc<dyn ImageStage>>,
    stage_timeout: Duration,
}

impl ImageResolver {
    /// An empty chain; add stages in priority order with [`with_stage`].
    ///
    /// [`with_stage`]: ImageResolver::with_stage
    pub fn new(stage_timeout: Duration) -> Self {
        Self {
            stages: Vec::new(),
            stage_timeout,
        }
    }

    /// The standard chain: remote AI, stock lookup, synthetic, default.
    pub fn from_config(config: &ImageConfig) -> Result<Self> {
        let mut resolver = Self::new(config.stage_timeout);
        if config.enable_remote {
            resolver = resolver.with_stage(Arc::new(RemoteAiStage::new(config)?));
        }
        Ok(resolver
            .with_stage(Arc::new(StockPhotoStage::default()))
            .with_stage(Arc::new(SyntheticStage::new(config.width, config.height)))
            .with_stage(Arc::new(DefaultImageStage::new(
                config.default_image_url.clone(),
            ))))
    }

    pub fn with_stage(mut self, stage: Arc<dyn ImageStage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub async fn resolve_image(&self, prompt: &str, style: Option<Style>) -> Result<ImageResult> {
        self.resolve_image_with_trace(prompt, style)
            .await
            .map(|(result, _)| result)
    }

    /// Like [`resolve_image`](ImageResolver::resolve_image), also returning
    /// the failures of every stage skipped before the winner.
    pub async fn resolve_image_with_trace(
        &self,
        prompt: &str,
        style: Option<Style>,
    ) -> Result<(ImageResult, Vec<StageFailure>)> {
        if prompt.is_empty() {
            return Err(InstaGenError::InvalidInput(
                "image prompt must not be empty".into(),
            ));
        }

        let style = style.unwrap_or_default();
        let seed = remote_seed(prompt);
        let mut failures = Vec::new();

        for stage in &self.stages {
            let deadline = stage.timeout().unwrap_or(self.stage_timeout);
            let _timer = logger::timer(&format!("image stage '{}'", stage.name()));

            let outcome = match tokio::time::timeout(deadline, stage.attempt(prompt, style, seed)).await {
                Ok(result) => result,
                Err(_) => Err(InstaGenError::Timeout(format!(
                    "stage '{}' exceeded {:?}",
                    stage.name(),
                    deadline
                ))),
            };

            match outcome {
                Ok(reference) => {
                    log::info!("Image resolved by stage '{}' ({})", stage.name(), stage.source());
                    let result = ImageResult {
                        source: stage.source(),
                        reference,
                        seed,
                    };
                    return Ok((result, failures));
                }
                Err(e) => {
                    log::warn!("Image stage '{}' skipped: {}", stage.name(), e);
                    failures.push(StageFailure {
                        stage: stage.name(),
                        source: stage.source(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let tried = failures
            .iter()
            .map(|f| format!("{}: {}", f.stage, f.reason))
            .collect::<Vec<_>>()
            .join("; ");
        Err(InstaGenError::ResourceUnavailable(format!(
            "all {} image stages failed for prompt category '{}' [{}]",
            self.stages.len(),
            classify(prompt),
            tried
        )))
    }
}
