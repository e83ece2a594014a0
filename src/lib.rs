pub mod config;
pub mod content;
pub mod error;
pub mod history;
pub mod imaging;
pub mod logger;
pub mod models;
pub mod remote;
pub mod studio;
pub mod vision;

pub use config::{Config, ImageConfig, OpenAiConfig};
pub use content::{classify, ContentGenerator, GeneratedContent, TemplateResolver};
pub use error::{InstaGenError, Result};
pub use history::{HistoryStore, JsonHistoryStore, MemoryHistoryStore};
pub use imaging::{ImageResolver, ImageStage};
pub use models::{
    ContentBundle, ContentCategory, ContentRequest, HistoryEntry, HistoryKind, ImageReference,
    ImageResult, ImageSource, Style,
};
pub use studio::{Post, Studio, UploadPost};
pub use vision::{DescriberChain, ImageDescriber};
