use crate::error::InstaGenError;
use crate::models::{ContentBundle, ImageResult, Style};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Image,
    Content,
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryKind::Image => "image",
            HistoryKind::Content => "content",
        }
    }
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryKind {
    type Err = InstaGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" | "images" => Ok(HistoryKind::Image),
            "content" | "contents" => Ok(HistoryKind::Content),
            other => Err(InstaGenError::InvalidInput(format!(
                "unknown history kind '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum HistoryPayload {
    Image(ImageResult),
    Content(ContentBundle),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub prompt: String,
    pub style: Option<Style>,
    pub payload: HistoryPayload,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(prompt: impl Into<String>, style: Option<Style>, payload: HistoryPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            style,
            payload,
            created_at: Utc::now(),
        }
    }

    pub fn image(prompt: impl Into<String>, style: Option<Style>, result: ImageResult) -> Self {
        Self::new(prompt, style, HistoryPayload::Image(result))
    }

    pub fn content(prompt: impl Into<String>, style: Option<Style>, bundle: ContentBundle) -> Self {
        Self::new(prompt, style, HistoryPayload::Content(bundle))
    }

    pub fn image_result(&self) -> Option<&ImageResult> {
        match &self.payload {
            HistoryPayload::Image(result) => Some(result),
            HistoryPayload::Content(_) => None,
        }
    }

    pub fn bundle(&self) -> Option<&ContentBundle> {
        match &self.payload {
            HistoryPayload::Content(bundle) => Some(bundle),
            HistoryPayload::Image(_) => None,
        }
    }

    pub fn kind(&self) -> HistoryKind {
        match self.payload {
            HistoryPayload::Image(_) => HistoryKind::Image,
            HistoryPayload::Content(_) => HistoryKind::Content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageReference, ImageSource};

    #[test]
    fn test_kind_follows_payload() {
        let entry = HistoryEntry::image(
            "sunset",
            Some(Style::Modern),
            ImageResult {
                source: ImageSource::FallbackDefault,
                reference: ImageReference::uri("https://example.com/x.jpg"),
                seed: 7,
            },
        );
        assert_eq!(entry.kind(), HistoryKind::Image);
        assert_eq!(entry.image_result().map(|r| r.seed), Some(7));
        assert!(entry.bundle().is_none());

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["payload"]["kind"], "image");
        assert_eq!(json["style"], "modern");
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("content".parse::<HistoryKind>().unwrap(), HistoryKind::Content);
        assert_eq!("Images".parse::<HistoryKind>().unwrap(), HistoryKind::Image);
        assert!("videos".parse::<HistoryKind>().is_err());
    }
}
