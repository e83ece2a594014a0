use crate::{
    error::Result,
    imaging::ImageStage,
    models::{ImageReference, ImageSource, Style},
};
use async_trait::async_trait;

/// Last resort: a fixed image link that always succeeds.
pub struct DefaultImageStage {
    uri: String,
}

impl DefaultImageStage {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

#[async_trait]
impl ImageStage for DefaultImageStage {
    fn name(&self) -> &'static str {
        "default"
    }

    fn source(&self) -> ImageSource {
        ImageSource::FallbackDefault
    }

    async fn attempt(&self, _prompt: &str, _style: Style, _seed: u64) -> Result<ImageReference> {
        Ok(ImageReference::uri(self.uri.clone()))
    }
}
