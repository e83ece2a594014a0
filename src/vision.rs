//! Short text descriptions of uploaded images.
//!
//! A description is only a hint: whatever text comes out is classified
//! like any typed prompt.

use crate::{
    content::classifier::classify,
    error::{InstaGenError, Result},
    models::{ChatMessage, ContentCategory, ImageReference},
    remote::ChatCompletion,
};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

const VISION_MAX_TOKENS: u32 = 50;

const VISION_PROMPT: &str = "Describe this image in 2-3 words only. What is the main subject? \
Examples: 'food pizza', 'person smiling', 'mountain landscape', 'car red', 'dog playing', \
'building modern'. Be very specific and brief.";

#[async_trait]
pub trait ImageDescriber: Send + Sync {
    fn name(&self) -> &'static str;

    async fn describe(&self, bytes: &[u8], mime_type: &str) -> Result<String>;
}

/// Asks a multimodal chat model for a two or three word description.
pub struct RemoteVisionDescriber {
    chat: Arc<dyn ChatCompletion>,
}

impl RemoteVisionDescriber {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl ImageDescriber for RemoteVisionDescriber {
    fn name(&self) -> &'static str {
        "vision_model"
    }

    async fn describe(&self, bytes: &[u8], mime_type: &str) -> Result<String> {
        let data_uri = ImageReference::inline(mime_type, bytes.to_vec()).to_display_uri();
        let reply = self
            .chat
            .complete(
                vec![ChatMessage::user_with_image(VISION_PROMPT, data_uri)],
                VISION_MAX_TOKENS,
            )
            .await?;

        let text = reply
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '.')
            .trim()
            .to_lowercase();
        if text.is_empty() {
            return Err(InstaGenError::ResponseError(
                "vision model returned an empty description".into(),
            ));
        }
        Ok(text)
    }
}

/// Maps an average colour to a hint the classifier understands.
pub fn color_hint(r: f64, g: f64, b: f64) -> &'static str {
    if r > 150.0 && g > 100.0 {
        "warm food tones"
    } else if g > r && g > b && g > 80.0 {
        "green nature tones"
    } else if b > r && b > g {
        "blue sky tones"
    } else {
        "balanced colors"
    }
}

/// Local fallback: decodes the upload and describes its average colour.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorAnalysisDescriber;

impl ColorAnalysisDescriber {
    pub fn average_rgb(bytes: &[u8]) -> Result<(f64, f64, f64)> {
        let rgb = image::load_from_memory(bytes)?.to_rgb8();
        let count = rgb.pixels().len();
        if count == 0 {
            return Err(InstaGenError::ImageError("image has no pixels".into()));
        }

        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for pixel in rgb.pixels() {
            r += pixel[0] as u64;
            g += pixel[1] as u64;
            b += pixel[2] as u64;
        }
        let n = count as f64;
        Ok((r as f64 / n, g as f64 / n, b as f64 / n))
    }
}

#[async_trait]
impl ImageDescriber for ColorAnalysisDescriber {
    fn name(&self) -> &'static str {
        "color_analysis"
    }

    async fn describe(&self, bytes: &[u8], _mime_type: &str) -> Result<String> {
        let (r, g, b) = Self::average_rgb(bytes)?;
        log::debug!("🎨 Average colour ({:.0}, {:.0}, {:.0})", r, g, b);
        Ok(color_hint(r, g, b).to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadDescription {
    pub text: String,
    pub category: ContentCategory,
    pub describer: &'static str,
}

/// Tries each describer in order; the first non-empty description wins.
#[derive(Clone)]
pub struct DescriberChain {
    describers: Vec<Arc<dyn ImageDescriber>>,
}

impl Default for DescriberChain {
    /// Colour analysis only.
    fn default() -> Self {
        Self {
            describers: vec![Arc::new(ColorAnalysisDescriber)],
        }
    }
}

impl DescriberChain {
    pub fn new(describers: Vec<Arc<dyn ImageDescriber>>) -> Self {
        Self { describers }
    }

    /// Remote vision first, colour analysis as the fallback.
    pub fn with_vision(chat: Arc<dyn ChatCompletion>) -> Self {
        Self::new(vec![
            Arc::new(RemoteVisionDescriber::new(chat)),
            Arc::new(ColorAnalysisDescriber),
        ])
    }

    pub async fn describe(&self, bytes: &[u8], mime_type: &str) -> Result<UploadDescription> {
        if bytes.is_empty() {
            return Err(InstaGenError::InvalidInput("uploaded image is empty".into()));
        }

        let mut last_error = None;
        for describer in &self.describers {
            match describer.describe(bytes, mime_type).await {
                Ok(text) => {
                    log::info!("🖼️  Upload described by '{}': {}", describer.name(), text);
                    return Ok(UploadDescription {
                        category: classify(&text),
                        text,
                        describer: describer.name(),
                    });
                }
                Err(e) => {
                    log::warn!("Describer '{}' failed: {}", describer.name(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            InstaGenError::ConfigurationError("no image describers configured".into())
        }))
    }
}
