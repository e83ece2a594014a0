pub mod chat_client;
pub mod image_client;

use crate::{error::Result, models::ChatMessage};
use async_trait::async_trait;

pub use chat_client::ChatClient;
pub use image_client::{ImageClient, RemoteImage};

/// A chat model that turns a message list into a single text reply.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String>;
}
