use crate::error::InstaGenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Realistic,
    Artistic,
    Cartoon,
    Vintage,
    Modern,
}

impl Default for Style {
    fn default() -> Self {
        Style::Realistic
    }
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Realistic,
        Style::Artistic,
        Style::Cartoon,
        Style::Vintage,
        Style::Modern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Realistic => "realistic",
            Style::Artistic => "artistic",
            Style::Cartoon => "cartoon",
            Style::Vintage => "vintage",
            Style::Modern => "modern",
        }
    }

    /// Phrase appended to prompts sent to remote image models.
    pub fn prompt_phrase(&self) -> &'static str {
        match self {
            Style::Realistic => {
                "photorealistic, high quality, detailed, professional photography"
            }
            Style::Artistic => "artistic, painting style, beautiful colors, creative, digital art",
            Style::Cartoon => "cartoon style, animated, colorful, fun, illustration",
            Style::Vintage => "vintage style, retro, classic, film photography, nostalgic",
            Style::Modern => "modern, contemporary, sleek, minimalist, clean design",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = InstaGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "realistic" => Ok(Style::Realistic),
            "artistic" => Ok(Style::Artistic),
            "cartoon" => Ok(Style::Cartoon),
            "vintage" => Ok(Style::Vintage),
            "modern" => Ok(Style::Modern),
            other => Err(InstaGenError::InvalidInput(format!(
                "unknown style '{}', expected one of realistic, artistic, cartoon, vintage, modern",
                other
            ))),
        }
    }
}

/// Topic buckets, listed in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Food,
    People,
    Nature,
    Animal,
    Vehicle,
    Architecture,
    Technology,
    Fashion,
    General,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 9] = [
        ContentCategory::Food,
        ContentCategory::People,
        ContentCategory::Nature,
        ContentCategory::Animal,
        ContentCategory::Vehicle,
        ContentCategory::Architecture,
        ContentCategory::Technology,
        ContentCategory::Fashion,
        ContentCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Food => "food",
            ContentCategory::People => "people",
            ContentCategory::Nature => "nature",
            ContentCategory::Animal => "animal",
            ContentCategory::Vehicle => "vehicle",
            ContentCategory::Architecture => "architecture",
            ContentCategory::Technology => "technology",
            ContentCategory::Fashion => "fashion",
            ContentCategory::General => "general",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub raw_text: String,
    pub style: Option<Style>,
}

impl ContentRequest {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// The style to render with when the caller did not pick one.
    pub fn effective_style(&self) -> Style {
        self.style.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub image_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

impl ContentBundle {
    pub fn hashtag_line(&self) -> String {
        self.hashtags.join(" ")
    }

    /// Plain-text export offered to users as a downloadable file.
    pub fn to_download_text(&self) -> String {
        let mut text = format!(
            "CAPTION:\n{}\n\nHASHTAGS:\n{}\n\nIMAGE DESCRIPTION:\n{}",
            self.caption,
            self.hashtag_line(),
            self.image_description
        );
        if let Some(tips) = &self.tips {
            text.push_str(&format!("\n\nTIPS:\n{}", tips));
        }
        text
    }
}
