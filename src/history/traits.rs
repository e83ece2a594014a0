use crate::{
    error::Result,
    models::{HistoryEntry, HistoryKind},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Append-only record of generated images and content.
///
/// Entries are never edited; a collection is only ever emptied as a whole.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, entry: HistoryEntry) -> Result<()>;

    /// Entries of `kind` in insertion order.
    async fn list(&self, kind: HistoryKind) -> Result<Vec<HistoryEntry>>;

    async fn clear(&self, kind: HistoryKind) -> Result<()>;

    async fn count(&self, kind: HistoryKind) -> Result<usize> {
        Ok(self.list(kind).await?.len())
    }

    async fn stats(&self) -> Result<HistoryStats> {
        Ok(HistoryStats {
            images: self.count(HistoryKind::Image).await?,
            contents: self.count(HistoryKind::Content).await?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub images: usize,
    pub contents: usize,
}
