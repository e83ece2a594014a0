use crate::{
    error::Result,
    history::{Collections, HistoryStore},
    models::{HistoryEntry, HistoryKind},
};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Non-persistent store; history lives as long as the process.
#[derive(Default)]
pub struct MemoryHistoryStore {
    collections: Mutex<Collections>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, entry: HistoryEntry) -> Result<()> {
        self.collections.lock().await.push(entry);
        Ok(())
    }

    async fn list(&self, kind: HistoryKind) -> Result<Vec<HistoryEntry>> {
        Ok(self.collections.lock().await.get(kind).to_vec())
    }

    async fn clear(&self, kind: HistoryKind) -> Result<()> {
        self.collections.lock().await.get_mut(kind).clear();
        Ok(())
    }

    async fn count(&self, kind: HistoryKind) -> Result<usize> {
        Ok(self.collections.lock().await.get(kind).len())
    }
}
