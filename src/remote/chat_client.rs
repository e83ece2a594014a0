use crate::{
    config::OpenAiConfig,
    error::{InstaGenError, Result},
    models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage},
    remote::ChatCompletion,
};
use async_trait::async_trait;
use reqwest::Client;

/// Client for OpenAI-compatible `chat/completions` endpoints.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(config: &OpenAiConfig, model: impl Into<String>) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| InstaGenError::ConfigurationError("OpenAI API key is required".into()))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| InstaGenError::ConfigurationError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url()),
            api_key,
            model: model.into(),
        })
    }

    /// Client bound to the configured caption-writing model.
    pub fn for_captions(config: &OpenAiConfig) -> Result<Self> {
        Self::new(config, config.chat_model())
    }

    /// Client bound to the configured multimodal model.
    pub fn for_vision(config: &OpenAiConfig) -> Result<Self> {
        Self::new(config, config.vision_model())
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatCompletion for ChatClient {
    async fn complete(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens,
        };

        log::info!("Invoking chat model: {}", self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Chat completion failed with status {}", status);
            return Err(InstaGenError::NetworkFailure(format!(
                "chat completion returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InstaGenError::ResponseError(e.to_string()))?;

        completion
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| InstaGenError::ResponseError("empty chat completion".into()))
    }
}
