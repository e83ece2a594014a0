use crate::{
    content::{
        classifier::classify,
        templates::{normalize_hashtags, tip_for, TemplateResolver},
    },
    error::Result,
    models::{ChatMessage, ContentBundle, ContentCategory, ContentRequest},
    remote::ChatCompletion,
};
use serde::Serialize;
use std::sync::Arc;

const CAPTION_MAX_TOKENS: u32 = 300;
const FALLBACK_CAPTION_CHARS: usize = 200;

const SYSTEM_PROMPT: &str = "You are a social media expert. Generate engaging captions, relevant hashtags, and posting tips for images.";

/// Where a bundle's caption came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentOrigin {
    RemoteModel,
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedContent {
    pub category: ContentCategory,
    pub origin: ContentOrigin,
    pub bundle: ContentBundle,
}

/// Sections of a free-form "1) caption 2) hashtags 3) tip" model reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedReply {
    pub caption: String,
    pub hashtags: String,
    pub tips: String,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Caption,
    Hashtags,
    Tips,
}

/// Splits a model reply into caption, hashtag and tip sections.
///
/// A line mentioning a section name (or starting with `1)`, `2)`, `3)`)
/// opens that section and is not itself kept.
pub fn parse_sectioned_reply(reply: &str) -> SectionedReply {
    let mut parsed = SectionedReply::default();
    let mut current = Section::None;

    for line in reply.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();
        if lower.contains("caption") || line.starts_with("1)") {
            current = Section::Caption;
            continue;
        } else if lower.contains("hashtag") || line.starts_with("2)") {
            current = Section::Hashtags;
            continue;
        } else if lower.contains("tip") || line.starts_with("3)") {
            current = Section::Tips;
            continue;
        }

        let target = match current {
            Section::Caption => &mut parsed.caption,
            Section::Hashtags => &mut parsed.hashtags,
            Section::Tips => &mut parsed.tips,
            Section::None => continue,
        };
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(line);
    }

    parsed
}

/// Produces content bundles, preferring a remote chat model when one is
/// configured and falling back to the deterministic templates.
#[derive(Clone)]
pub struct ContentGenerator {
    resolver: TemplateResolver,
    chat: Option<Arc<dyn ChatCompletion>>,
}

impl ContentGenerator {
    pub fn new(resolver: TemplateResolver) -> Self {
        Self {
            resolver,
            chat: None,
        }
    }

    pub fn with_chat(mut self, chat: Arc<dyn ChatCompletion>) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    /// Deterministic template path only.
    pub fn from_templates(&self, request: &ContentRequest) -> Result<GeneratedContent> {
        let category = classify(&request.raw_text);
        let bundle = self
            .resolver
            .resolve(category, &request.raw_text, request.style)?;
        Ok(GeneratedContent {
            category,
            origin: ContentOrigin::Template,
            bundle,
        })
    }

    pub async fn generate(&self, request: &ContentRequest) -> Result<GeneratedContent> {
        let templated = self.from_templates(request)?;

        let Some(chat) = &self.chat else {
            return Ok(templated);
        };
        if request.raw_text.trim().is_empty() {
            return Ok(templated);
        }

        let prompt = format!(
            "Create social media content for this specific image: '{}' in {} style. The caption should be about the ACTUAL IMAGE CONTENT (what's shown: {}). Provide: 1) An engaging caption about the image subject (2-3 sentences), 2) 10-15 relevant hashtags, 3) One posting tip.",
            request.raw_text.trim(),
            request.effective_style(),
            request.raw_text.trim()
        );
        let messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];

        match chat.complete(messages, CAPTION_MAX_TOKENS).await {
            Ok(reply) => {
                let bundle = self.merge_reply(&reply, request, &templated.bundle);
                log::debug!("Caption written by remote model ({} hashtags)", bundle.hashtags.len());
                Ok(GeneratedContent {
                    category: templated.category,
                    origin: ContentOrigin::RemoteModel,
                    bundle,
                })
            }
            Err(e) => {
                log::warn!("Remote caption generation failed, using templates: {}", e);
                Ok(templated)
            }
        }
    }

    fn merge_reply(
        &self,
        reply: &str,
        request: &ContentRequest,
        templated: &ContentBundle,
    ) -> ContentBundle {
        let sections = parse_sectioned_reply(reply);

        let caption = if sections.caption.is_empty() {
            let head: String = reply.chars().take(FALLBACK_CAPTION_CHARS).collect();
            format!("{}...", head.trim_end())
        } else {
            sections.caption
        };

        let remote_tags = normalize_hashtags(
            sections
                .hashtags
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty()),
            self.resolver.max_hashtags(),
        );
        let hashtags = if remote_tags.is_empty() {
            templated.hashtags.clone()
        } else {
            remote_tags
        };

        let tips = if sections.tips.is_empty() {
            tip_for(request.style).to_string()
        } else {
            sections.tips
        };

        ContentBundle {
            caption,
            hashtags,
            image_description: templated.image_description.clone(),
            tips: Some(tips),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstaGenError;
    use crate::models::Style;
    use async_trait::async_trait;

    struct FixedChat(std::result::Result<String, String>);

    #[async_trait]
    impl ChatCompletion for FixedChat {
        async fn complete(&self, _messages: Vec<ChatMessage>, _max_tokens: u32) -> Result<String> {
            self.0
                .clone()
                .map_err(InstaGenError::NetworkFailure)
        }
    }

    #[test]
    fn test_parse_sectioned_reply() {
        let reply = "Caption:\nSlice of heaven.\nFresh from the oven.\n\nHashtags:\n#pizza #food #yum\n\nTip:\nPost at dinner time.";
        let parsed = parse_sectioned_reply(reply);
        assert_eq!(parsed.caption, "Slice of heaven. Fresh from the oven.");
        assert_eq!(parsed.hashtags, "#pizza #food #yum");
        assert_eq!(parsed.tips, "Post at dinner time.");
    }

    #[test]
    fn test_parse_numbered_reply() {
        let parsed = parse_sectioned_reply("1)\nGreat view\n2)\n#view\n3)\nShare it");
        assert_eq!(parsed.caption, "Great view");
        assert_eq!(parsed.hashtags, "#view");
        assert_eq!(parsed.tips, "Share it");
    }

    #[tokio::test]
    async fn test_without_chat_uses_templates() {
        let generator = ContentGenerator::new(TemplateResolver::default());
        let generated = generator
            .generate(&ContentRequest::new("delicious pizza"))
            .await
            .unwrap();
        assert_eq!(generated.category, ContentCategory::Food);
        assert_eq!(generated.origin, ContentOrigin::Template);
        assert!(generated.bundle.caption.contains("pizza"));
    }

    #[tokio::test]
    async fn test_remote_reply_is_normalized() {
        let reply = "Caption:\nSlice of heaven.\nHashtags:\n#pizza, #Pizza #food\nTip:\nPost at dinner.";
        let generator = ContentGenerator::new(TemplateResolver::new(10))
            .with_chat(Arc::new(FixedChat(Ok(reply.to_string()))));

        let generated = generator
            .generate(&ContentRequest::new("pizza").with_style(Style::Modern))
            .await
            .unwrap();
        assert_eq!(generated.origin, ContentOrigin::RemoteModel);
        assert_eq!(generated.bundle.caption, "Slice of heaven.");
        assert_eq!(generated.bundle.hashtags, vec!["#pizza", "#food"]);
        assert_eq!(generated.bundle.tips.as_deref(), Some("Post at dinner."));
        assert!(generated.bundle.image_description.contains("pizza"));
    }

    #[tokio::test]
    async fn test_unstructured_reply_falls_back_per_field() {
        let generator = ContentGenerator::new(TemplateResolver::default())
            .with_chat(Arc::new(FixedChat(Ok("Just a lovely pie.".to_string()))));

        let generated = generator
            .generate(&ContentRequest::new("pizza"))
            .await
            .unwrap();
        assert_eq!(generated.bundle.caption, "Just a lovely pie....");
        assert!(generated.bundle.hashtags.contains(&"#food".to_string()));
    }

    #[tokio::test]
    async fn test_chat_failure_falls_back_to_templates() {
        let generator = ContentGenerator::new(TemplateResolver::default())
            .with_chat(Arc::new(FixedChat(Err("connection refused".to_string()))));

        let request = ContentRequest::new("red sports car");
        let generated = generator.generate(&request).await.unwrap();
        assert_eq!(generated.origin, ContentOrigin::Template);
        assert_eq!(generated, generator.from_templates(&request).unwrap());
    }

    #[tokio::test]
    async fn test_empty_text_skips_remote() {
        let generator = ContentGenerator::new(TemplateResolver::default())
            .with_chat(Arc::new(FixedChat(Ok("Caption:\nignored".to_string()))));

        let generated = generator.generate(&ContentRequest::new("  ")).await.unwrap();
        assert_eq!(generated.category, ContentCategory::General);
        assert_eq!(generated.origin, ContentOrigin::Template);
        assert!(!generated.bundle.hashtags.is_empty());
    }
}
