use crate::{
    config::ImageConfig,
    error::{InstaGenError, Result},
    imaging::ImageStage,
    models::{ImageReference, ImageSource, Style},
    remote::{ImageClient, RemoteImage},
};
use async_trait::async_trait;

const DEFAULT_MIME: &str = "image/jpeg";

/// Remote AI generation through Pollinations.
pub struct RemoteAiStage {
    client: ImageClient,
    min_image_bytes: usize,
}

impl RemoteAiStage {
    pub fn new(config: &ImageConfig) -> Result<Self> {
        Ok(Self {
            client: ImageClient::new(config)?,
            min_image_bytes: config.min_image_bytes,
        })
    }
}

/// Success predicate: HTTP 200, an image content type (when one is sent)
/// and a body larger than `min_bytes`.
pub fn accept_remote_image(image: RemoteImage, min_bytes: usize) -> Result<ImageReference> {
    if image.status != 200 {
        return Err(InstaGenError::NetworkFailure(format!(
            "image service returned status {}",
            image.status
        )));
    }
    if let Some(content_type) = &image.content_type {
        if !content_type.starts_with("image/") {
            return Err(InstaGenError::ResponseError(format!(
                "image service returned non-image content '{}'",
                content_type
            )));
        }
    }
    if image.bytes.len() <= min_bytes {
        return Err(InstaGenError::ResponseError(format!(
            "image payload too small ({} bytes, need more than {})",
            image.bytes.len(),
            min_bytes
        )));
    }

    let mime_type = image
        .content_type
        .unwrap_or_else(|| DEFAULT_MIME.to_string());
    Ok(ImageReference::inline(mime_type, image.bytes))
}

#[async_trait]
impl ImageStage for RemoteAiStage {
    fn name(&self) -> &'static str {
        "pollinations"
    }

    fn source(&self) -> ImageSource {
        ImageSource::RemoteAi
    }

    async fn attempt(&self, prompt: &str, style: Style, seed: u64) -> Result<ImageReference> {
        let image = self.client.generate(prompt, style, seed).await?;
        accept_remote_image(image, self.min_image_bytes)
    }
}
