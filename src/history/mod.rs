pub mod json_file;
pub mod memory;
pub mod traits;

use crate::{
    config::Config,
    error::Result,
    models::{HistoryEntry, HistoryKind},
};
use std::sync::Arc;

pub use json_file::JsonHistoryStore;
pub use memory::MemoryHistoryStore;
pub use traits::{HistoryStats, HistoryStore};

/// The two collections every store keeps.
#[derive(Debug, Default, Clone)]
pub(crate) struct Collections {
    pub images: Vec<HistoryEntry>,
    pub contents: Vec<HistoryEntry>,
}

impl Collections {
    pub fn get(&self, kind: HistoryKind) -> &[HistoryEntry] {
        match kind {
            HistoryKind::Image => &self.images,
            HistoryKind::Content => &self.contents,
        }
    }

    pub fn get_mut(&mut self, kind: HistoryKind) -> &mut Vec<HistoryEntry> {
        match kind {
            HistoryKind::Image => &mut self.images,
            HistoryKind::Content => &mut self.contents,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.get_mut(entry.kind()).push(entry);
    }
}

/// The JSON store under `config.history_dir`.
pub async fn open_store(config: &Config) -> Result<Arc<dyn HistoryStore>> {
    Ok(Arc::new(JsonHistoryStore::open(&config.history_dir).await?))
}
