use crate::{
    error::Result,
    history::{Collections, HistoryStore},
    models::{HistoryEntry, HistoryKind},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// History persisted as two pretty-printed JSON arrays in one directory.
///
/// Both files are read once when the store is opened and rewritten in full
/// (temp file + rename) on every change. Memory only changes after the
/// write succeeds.
pub struct JsonHistoryStore {
    dir: PathBuf,
    collections: Mutex<Collections>,
}

impl JsonHistoryStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let mut collections = Collections::default();
        for kind in [HistoryKind::Image, HistoryKind::Content] {
            *collections.get_mut(kind) = load_collection(&Self::path_in(&dir, kind)).await;
        }

        log::info!(
            "📚 History loaded from {} ({} images, {} contents)",
            dir.display(),
            collections.images.len(),
            collections.contents.len()
        );

        Ok(Self {
            dir,
            collections: Mutex::new(collections),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: HistoryKind) -> PathBuf {
        Self::path_in(&self.dir, kind)
    }

    fn path_in(dir: &Path, kind: HistoryKind) -> PathBuf {
        dir.join(format!("{}_history.json", kind.as_str()))
    }

    async fn persist(&self, kind: HistoryKind, entries: &[HistoryEntry]) -> Result<()> {
        let path = self.path_for(kind);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(entries)?;

        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

/// Missing or unreadable files start empty.
async fn load_collection(path: &Path) -> Vec<HistoryEntry> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            log::warn!("Could not read history file {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!(
                "History file {} is corrupt, starting empty: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

#[async_trait]
impl HistoryStore for JsonHistoryStore {
    async fn append(&self, entry: HistoryEntry) -> Result<()> {
        let kind = entry.kind();
        let mut collections = self.collections.lock().await;

        let mut updated = collections.get(kind).to_vec();
        updated.push(entry);
        self.persist(kind, &updated).await?;

        *collections.get_mut(kind) = updated;
        log::debug!("💾 Appended {} history entry", kind);
        Ok(())
    }

    async fn list(&self, kind: HistoryKind) -> Result<Vec<HistoryEntry>> {
        Ok(self.collections.lock().await.get(kind).to_vec())
    }

    async fn clear(&self, kind: HistoryKind) -> Result<()> {
        let mut collections = self.collections.lock().await;
        self.persist(kind, &[]).await?;
        collections.get_mut(kind).clear();
        log::info!("🗑️  Cleared {} history", kind);
        Ok(())
    }

    async fn count(&self, kind: HistoryKind) -> Result<usize> {
        Ok(self.collections.lock().await.get(kind).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentBundle, ImageReference, ImageResult, ImageSource, Style};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn content_entry(prompt: &str) -> HistoryEntry {
        HistoryEntry::content(
            prompt,
            Some(Style::Vintage),
            ContentBundle {
                caption: format!("caption for {prompt}"),
                hashtags: vec!["#vintage".into(), "#retro".into()],
                image_description: "alt".into(),
                tips: Some("tip".into()),
            },
        )
    }

    fn image_entry(prompt: &str) -> HistoryEntry {
        HistoryEntry::image(
            prompt,
            None,
            ImageResult {
                source: ImageSource::LocalSynthetic,
                reference: ImageReference::inline("image/png", vec![137, 80, 78, 71]),
                seed: 42,
            },
        )
    }

    #[tokio::test]
    async fn test_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        let store = JsonHistoryStore::open(dir.path()).await.unwrap();
        store.append(content_entry("first")).await.unwrap();
        store.append(content_entry("second")).await.unwrap();
        store.append(image_entry("sunset")).await.unwrap();
        let before = store.list(HistoryKind::Content).await.unwrap();
        drop(store);

        let reopened = JsonHistoryStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.list(HistoryKind::Content).await.unwrap(), before);
        let images = reopened.list(HistoryKind::Image).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].payload, image_entry("sunset").payload);
    }

    #[tokio::test]
    async fn test_file_names_and_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::open(dir.path()).await.unwrap();
        store.append(image_entry("sunset")).await.unwrap();

        let path = dir.path().join("image_history.json");
        assert_eq!(store.path_for(HistoryKind::Image), path);

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["payload"]["kind"], "image");
        assert!(raw.contains('\n'), "history should be pretty printed");
        assert!(!dir.path().join("content_history.json").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("content_history.json"), b"{ not json").unwrap();

        let store = JsonHistoryStore::open(dir.path()).await.unwrap();
        assert_eq!(store.count(HistoryKind::Content).await.unwrap(), 0);

        store.append(content_entry("fresh")).await.unwrap();
        let reopened = JsonHistoryStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.count(HistoryKind::Content).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::open(dir.path()).await.unwrap();
        store.append(content_entry("a")).await.unwrap();
        store.append(image_entry("b")).await.unwrap();
        store.clear(HistoryKind::Content).await.unwrap();
        assert!(store.list(HistoryKind::Content).await.unwrap().is_empty());

        store.append(content_entry("c")).await.unwrap();
        drop(store);

        let reopened = JsonHistoryStore::open(dir.path()).await.unwrap();
        let contents = reopened.list(HistoryKind::Content).await.unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].prompt, "c");
        assert_eq!(reopened.count(HistoryKind::Image).await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonHistoryStore::open(dir.path()).await.unwrap());

        let handles: Vec<_> = (0..40)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.append(content_entry(&format!("post {i}"))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.count(HistoryKind::Content).await.unwrap(), 40);
        drop(store);

        let raw = std::fs::read_to_string(dir.path().join("content_history.json")).unwrap();
        let on_disk: Vec<HistoryEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(on_disk.len(), 40);
        let prompts: HashSet<_> = on_disk.iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(prompts.len(), 40);

        let reopened = JsonHistoryStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.count(HistoryKind::Content).await.unwrap(), 40);
        assert!(!dir.path().join("content_history.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_opens_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = JsonHistoryStore::open(&nested).await.unwrap();
        assert_eq!(store.dir(), nested.as_path());
        assert_eq!(store.stats().await.unwrap().images, 0);
    }
}
