//! Keyword classification of free-text descriptions.
//!
//! Every caller that needs to map text to a topic (content generation, the
//! stock image lookup, the colour-analysis fallback and palette selection)
//! goes through the helpers in this module.

use crate::error::{InstaGenError, Result};
use crate::models::ContentCategory;
use once_cell::sync::Lazy;
use serde_json::Value;

/// Keyword sets in classification priority order.
const CATEGORY_KEYWORDS: &[(ContentCategory, &[&str])] = &[
    (
        ContentCategory::Food,
        &[
            "food", "pizza", "burger", "cake", "coffee", "drink", "meal", "dish", "restaurant",
            "cooking", "cook", "bread", "fruit", "vegetable", "dessert", "lunch", "dinner",
            "breakfast", "eat", "delicious", "tasty", "yummy", "hungry", "recipe", "pasta",
            "sushi", "ice cream",
        ],
    ),
    (
        ContentCategory::People,
        &[
            "person", "people", "man", "men", "woman", "women", "child", "children", "baby",
            "face", "smiling", "smile", "portrait", "selfie", "group", "family", "friend",
            "myself",
        ],
    ),
    (
        ContentCategory::Nature,
        &[
            "nature", "tree", "forest", "mountain", "sky", "sunset", "sunrise", "beach", "ocean",
            "sea", "river", "lake", "park", "garden", "flower", "plant", "outdoor", "outdoors",
            "landscape", "scenery", "waterfall",
        ],
    ),
    (
        ContentCategory::Animal,
        &[
            "animal", "dog", "cat", "pet", "bird", "horse", "wildlife", "puppy", "kitten",
            "puppies", "fish",
        ],
    ),
    (
        ContentCategory::Vehicle,
        &[
            "car", "bike", "bicycle", "motorcycle", "truck", "vehicle", "transport", "road",
            "driving", "train", "boat",
        ],
    ),
    (
        ContentCategory::Architecture,
        &[
            "building", "house", "architecture", "city", "urban", "street", "bridge", "tower",
            "construction", "home", "office", "skyline", "skyscraper",
        ],
    ),
    (
        ContentCategory::Technology,
        &[
            "phone", "smartphone", "computer", "tech", "technology", "device", "gadget",
            "electronic", "electronics", "screen", "digital", "laptop", "tablet", "camera",
            "headphones", "robot",
        ],
    ),
    (
        ContentCategory::Fashion,
        &[
            "outfit", "clothes", "fashion", "dress", "shirt", "shoes", "accessories", "wearing",
            "ootd", "jacket", "sneakers",
        ],
    ),
];

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::default);

/// Lower-cased alphanumeric tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn token_matches(token: &str, keyword: &str) -> bool {
    token == keyword
        || token.strip_suffix("es") == Some(keyword)
        || token.strip_suffix('s') == Some(keyword)
}

/// Whole-word match of `keyword` against pre-tokenized text. Multi-word
/// keywords must appear as a contiguous token run.
pub fn matches_keyword(tokens: &[String], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword.split_whitespace().collect();
    match parts.len() {
        0 => false,
        1 => tokens.iter().any(|token| token_matches(token, parts[0])),
        n => tokens.windows(n).any(|window| {
            window
                .iter()
                .zip(parts.iter())
                .all(|(token, part)| token_matches(token, part))
        }),
    }
}

/// First entry of an ordered keyword table that matches `text`.
pub fn lookup<'a, T>(text: &str, table: &'a [(&'a str, T)]) -> Option<&'a T> {
    let tokens = tokenize(text);
    table
        .iter()
        .find(|(keyword, _)| matches_keyword(&tokens, keyword))
        .map(|(_, value)| value)
}

/// Ordered keyword classifier over a category table.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    rules: &'static [(ContentCategory, &'static [&'static str])],
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: CATEGORY_KEYWORDS,
        }
    }
}

impl Classifier {
    pub fn classify(&self, raw_text: &str) -> ContentCategory {
        let tokens = tokenize(raw_text.trim());
        if tokens.is_empty() {
            return ContentCategory::General;
        }

        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| matches_keyword(&tokens, k)))
            .map(|(category, _)| *category)
            .unwrap_or(ContentCategory::General)
    }
}

/// Classifies with the built-in keyword table.
pub fn classify(raw_text: &str) -> ContentCategory {
    DEFAULT_CLASSIFIER.classify(raw_text)
}

/// Classifies an untyped value, as received from JSON callers.
pub fn classify_value(value: &Value) -> Result<ContentCategory> {
    match value {
        Value::String(text) => Ok(classify(text)),
        other => Err(InstaGenError::InvalidInput(format!(
            "expected a string description, got {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
