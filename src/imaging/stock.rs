use crate::{
    content::classifier::lookup,
    error::{InstaGenError, Result},
    imaging::ImageStage,
    models::{ImageReference, ImageSource, Style},
};
use async_trait::async_trait;

const STOCK_PHOTOS: &[(&str, &str)] = &[
    ("sunset", "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=512&h=512&fit=crop"),
    ("sunrise", "https://images.unsplash.com/photo-1560707303-4e980ce876ad?w=512&h=512&fit=crop"),
    ("mountain", "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=512&h=512&fit=crop"),
    ("ocean", "https://images.unsplash.com/photo-1505142468610-359e7d316be0?w=512&h=512&fit=crop"),
    ("coffee", "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?w=512&h=512&fit=crop"),
    ("cat", "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?w=512&h=512&fit=crop"),
    ("flower", "https://images.unsplash.com/photo-1490750967868-88aa4486c946?w=512&h=512&fit=crop"),
];

/// Keyword lookup into a small table of stock photo links.
pub struct StockPhotoStage {
    entries: Vec<(String, String)>,
}

impl Default for StockPhotoStage {
    fn default() -> Self {
        Self {
            entries: STOCK_PHOTOS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl StockPhotoStage {
    pub fn with_entries(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn find(&self, prompt: &str) -> Option<&str> {
        let table: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        lookup(prompt, &table).copied()
    }
}

#[async_trait]
impl ImageStage for StockPhotoStage {
    fn name(&self) -> &'static str {
        "stock"
    }

    fn source(&self) -> ImageSource {
        ImageSource::RemoteStatic
    }

    async fn attempt(&self, prompt: &str, _style: Style, _seed: u64) -> Result<ImageReference> {
        self.find(prompt)
            .map(ImageReference::uri)
            .ok_or_else(|| InstaGenError::ResponseError("no stock photo matches the prompt".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match() {
        let stage = StockPhotoStage::default();
        assert_eq!(stage.find("Black cats at night"), Some(STOCK_PHOTOS[5].1));
        assert_eq!(stage.find("sunrise"), Some(STOCK_PHOTOS[1].1));
        assert!(stage.find("a concatenated string").is_none());
        assert!(stage.find("").is_none());
    }

    #[tokio::test]
    async fn test_no_match_fails_stage() {
        let stage = StockPhotoStage::with_entries(vec![]);
        assert!(stage.attempt("cat", Style::Realistic, 0).await.is_err());
    }
}
