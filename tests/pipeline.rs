use async_trait::async_trait;
use instagen::{
    content::TemplateResolver,
    imaging::{DefaultImageStage, StockPhotoStage, SyntheticStage},
    models::ImageReference,
    classify, Config, ContentCategory, ContentGenerator, ContentRequest, HistoryKind,
    HistoryStore, ImageConfig, ImageResolver, ImageSource, ImageStage, InstaGenError,
    JsonHistoryStore, Studio, Style,
};
use std::sync::Arc;
use std::time::Duration;

struct UnreachableAi;

#[async_trait]
impl ImageStage for UnreachableAi {
    fn name(&self) -> &'static str {
        "pollinations"
    }

    fn source(&self) -> ImageSource {
        ImageSource::RemoteAi
    }

    async fn attempt(&self, _prompt: &str, _style: Style, _seed: u64) -> instagen::Result<ImageReference> {
        Err(InstaGenError::NetworkFailure("connection refused".into()))
    }
}

fn offline_resolver() -> ImageResolver {
    ImageResolver::new(Duration::from_secs(2))
        .with_stage(Arc::new(UnreachableAi))
        .with_stage(Arc::new(StockPhotoStage::default()))
        .with_stage(Arc::new(SyntheticStage::new(96, 96)))
        .with_stage(Arc::new(DefaultImageStage::new("https://example.com/default.jpg")))
}

#[tokio::test]
async fn pizza_is_food_with_matching_caption() {
    let generator = ContentGenerator::new(TemplateResolver::default());
    let generated = generator
        .generate(&ContentRequest::new("delicious pizza"))
        .await
        .unwrap();

    assert_eq!(generated.category, ContentCategory::Food);
    assert!(generated.bundle.hashtags.iter().any(|t| t == "#food"));
    assert!(generated.bundle.caption.contains("pizza"));
}

#[tokio::test]
async fn empty_input_still_yields_a_bundle() {
    let generator = ContentGenerator::new(TemplateResolver::default());
    let generated = generator.generate(&ContentRequest::new("")).await.unwrap();

    assert_eq!(generated.category, ContentCategory::General);
    assert!(!generated.bundle.caption.is_empty());
    assert!(!generated.bundle.hashtags.is_empty());
    assert!(generated.bundle.tips.is_some());
}

#[test]
fn classification_and_templates_are_deterministic() {
    let resolver = TemplateResolver::default();
    for text in ["red sports car", "my cat sleeping", "new phone", "", "ootd"] {
        let category = classify(text);
        assert_eq!(category, classify(text));
        let a = resolver.resolve(category, text, Some(Style::Artistic)).unwrap();
        let b = resolver.resolve(category, text, Some(Style::Artistic)).unwrap();
        assert_eq!(a, b);

        let mut seen = std::collections::HashSet::new();
        assert!(a.hashtags.len() <= resolver.max_hashtags());
        assert!(a.hashtags.iter().all(|t| seen.insert(t.to_lowercase())));
    }
}

#[tokio::test]
async fn failed_ai_and_no_stock_match_falls_back_to_synthetic() {
    let (result, failures) = offline_resolver()
        .resolve_image_with_trace("abstract geometry", Some(Style::Cartoon))
        .await
        .unwrap();

    assert_eq!(result.source, ImageSource::LocalSynthetic);
    let png = result.reference.inline_bytes().unwrap();
    assert_eq!(&png[..4], b"\x89PNG");
    let stages: Vec<_> = failures.iter().map(|f| f.stage).collect();
    assert_eq!(stages, vec!["pollinations", "stock"]);
}

#[tokio::test]
async fn synthetic_fallback_is_reproducible() {
    let resolver = offline_resolver();
    let a = resolver.resolve_image("quiet abstract shapes", None).await.unwrap();
    let b = resolver.resolve_image("quiet abstract shapes", None).await.unwrap();
    assert_eq!(a.reference, b.reference);
}

#[tokio::test]
async fn history_clear_then_append() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonHistoryStore::open(dir.path()).await.unwrap());
    let studio = Studio::from_parts(ContentGenerator::new(TemplateResolver::default()), offline_resolver())
        .with_history(store.clone());

    studio.create_post(&ContentRequest::new("sunset at the beach")).await.unwrap();
    studio.clear_history(HistoryKind::Image).await.unwrap();
    assert!(studio.history_entries(HistoryKind::Image).await.unwrap().is_empty());
    assert_eq!(store.count(HistoryKind::Content).await.unwrap(), 1);

    let image = studio.resolve_image("coffee", None).await.unwrap();
    let entries = studio.history_entries(HistoryKind::Image).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].image_result(), Some(&image));
}

#[tokio::test]
async fn studio_history_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new()
        .with_history_dir(dir.path())
        .with_image(ImageConfig::default().with_remote(false).with_size(64, 64));

    let studio = Studio::new(config.clone()).await.unwrap();
    let post = studio
        .create_post(&ContentRequest::new("golden retriever puppy").with_style(Style::Vintage))
        .await
        .unwrap();
    assert_eq!(post.content.category, ContentCategory::Animal);
    drop(studio);

    let reopened = Studio::new(config).await.unwrap();
    let contents = reopened.history_entries(HistoryKind::Content).await.unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].bundle(), Some(&post.content.bundle));
    assert_eq!(contents[0].style, Some(Style::Vintage));
    assert_eq!(reopened.history_stats().await.unwrap().images, 1);
}
