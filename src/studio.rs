use crate::{
    config::Config,
    content::{ContentGenerator, GeneratedContent, TemplateResolver},
    error::Result,
    history::{self, HistoryStats, HistoryStore, MemoryHistoryStore},
    imaging::ImageResolver,
    logger,
    models::{ContentRequest, HistoryEntry, HistoryKind, ImageResult, Style},
    remote::ChatClient,
    vision::{DescriberChain, UploadDescription},
};
use serde::Serialize;
use std::sync::Arc;

/// Caption, hashtags and image for one prompt.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub content: GeneratedContent,
    pub image: ImageResult,
}

/// Content generated for an uploaded image.
#[derive(Debug, Clone, Serialize)]
pub struct UploadPost {
    pub description: UploadDescription,
    pub content: GeneratedContent,
}

/// Top-level client tying content generation, image resolution and
/// history together.
#[derive(Clone)]
pub struct Studio {
    generator: ContentGenerator,
    images: ImageResolver,
    describer: DescriberChain,
    history: Arc<dyn HistoryStore>,
}

impl Studio {
    /// Validates `config`, opens the JSON history under `history_dir` and
    /// wires the remote chat model in when OpenAI credentials are set.
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let history = history::open_store(&config).await?;
        let mut generator = ContentGenerator::new(TemplateResolver::new(config.max_hashtags));
        let mut describer = DescriberChain::default();

        if let Some(openai) = &config.openai {
            let captions = ChatClient::for_captions(openai)?;
            log::info!("🤖 Remote captions enabled ({})", captions.model());
            generator = generator.with_chat(Arc::new(captions));
            describer = DescriberChain::with_vision(Arc::new(ChatClient::for_vision(openai)?));
        }

        Ok(Self {
            generator,
            images: ImageResolver::from_config(&config.image)?,
            describer,
            history,
        })
    }

    /// Assembles a studio from prebuilt parts, with in-memory history.
    pub fn from_parts(generator: ContentGenerator, images: ImageResolver) -> Self {
        Self {
            generator,
            images,
            describer: DescriberChain::default(),
            history: Arc::new(MemoryHistoryStore::new()),
        }
    }

    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = history;
        self
    }

    pub fn with_describer(mut self, describer: DescriberChain) -> Self {
        self.describer = describer;
        self
    }

    pub fn generator(&self) -> &ContentGenerator {
        &self.generator
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    pub async fn generate_content(&self, request: &ContentRequest) -> Result<GeneratedContent> {
        let _timer = logger::timer("content generation");
        let generated = self.generator.generate(request).await?;
        log::info!(
            "✍️  Content ready: category={} origin={:?} hashtags={}",
            generated.category,
            generated.origin,
            generated.bundle.hashtags.len()
        );

        self.record(HistoryEntry::content(
            request.raw_text.clone(),
            request.style,
            generated.bundle.clone(),
        ))
        .await;
        Ok(generated)
    }

    pub async fn resolve_image(&self, prompt: &str, style: Option<Style>) -> Result<ImageResult> {
        let _timer = logger::timer("image resolution");
        let result = self.images.resolve_image(prompt, style).await?;
        if result.source.is_degraded() {
            log::warn!("🖼️  Image served from fallback source '{}'", result.source);
        }

        self.record(HistoryEntry::image(prompt, style, result.clone())).await;
        Ok(result)
    }

    /// Content first, then the image. An empty prompt still gets an image,
    /// drawn from the bundle's alt text.
    pub async fn create_post(&self, request: &ContentRequest) -> Result<Post> {
        let content = self.generate_content(request).await?;

        let prompt = match request.raw_text.trim() {
            "" => content.bundle.image_description.clone(),
            text => text.to_string(),
        };
        let image = self.resolve_image(&prompt, request.style).await?;

        Ok(Post { content, image })
    }

    /// Describes an uploaded image and writes content for that description.
    pub async fn describe_upload(
        &self,
        bytes: &[u8],
        mime_type: &str,
        style: Option<Style>,
    ) -> Result<UploadPost> {
        let description = self.describer.describe(bytes, mime_type).await?;

        let mut request = ContentRequest::new(description.text.clone());
        request.style = style;
        let content = self.generate_content(&request).await?;

        Ok(UploadPost {
            description,
            content,
        })
    }

    pub async fn history_entries(&self, kind: HistoryKind) -> Result<Vec<HistoryEntry>> {
        self.history.list(kind).await
    }

    pub async fn clear_history(&self, kind: HistoryKind) -> Result<()> {
        self.history.clear(kind).await
    }

    pub async fn history_stats(&self) -> Result<HistoryStats> {
        self.history.stats().await
    }

    /// History writes never fail a generation.
    async fn record(&self, entry: HistoryEntry) {
        let kind = entry.kind();
        if let Err(e) = self.history.append(entry).await {
            log::error!("❌ Failed to record {} history: {}", kind, e);
        }
    }
}
