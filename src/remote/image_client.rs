use crate::{
    config::ImageConfig,
    error::{InstaGenError, Result},
    models::Style,
};
use reqwest::{Client, Url};

/// Raw body of a remote image generation call.
#[derive(Debug, Clone)]
pub struct RemoteImage {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Client for the Pollinations text-to-image endpoint.
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    base_url: String,
    width: u32,
    height: u32,
}

impl ImageClient {
    pub fn new(config: &ImageConfig) -> Result<Self> {
        // The coordinator enforces the stage deadline; this one bounds the socket.
        let client = Client::builder()
            .timeout(config.stage_timeout)
            .build()
            .map_err(|e| InstaGenError::ConfigurationError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.pollinations_url.clone(),
            width: config.width,
            height: config.height,
        })
    }

    pub fn request_url(&self, prompt: &str, style: Style, seed: u64) -> Result<Url> {
        let enhanced = format!("{}, {}", prompt.trim(), style.prompt_phrase());

        let mut url = Url::parse(&self.base_url).map_err(|e| {
            InstaGenError::ConfigurationError(format!("invalid image service URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                InstaGenError::ConfigurationError(format!(
                    "image service URL cannot be a base: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("prompt")
            .push(&enhanced);
        url.query_pairs_mut()
            .append_pair("width", &self.width.to_string())
            .append_pair("height", &self.height.to_string())
            .append_pair("seed", &seed.to_string())
            .append_pair("nologo", "true");

        Ok(url)
    }

    pub async fn generate(&self, prompt: &str, style: Style, seed: u64) -> Result<RemoteImage> {
        let url = self.request_url(prompt, style, seed)?;
        log::info!("Requesting remote image (seed {})", seed);
        log::debug!("Remote image URL: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).trim().to_string());
        let bytes = response.bytes().await?.to_vec();

        Ok(RemoteImage {
            status,
            content_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_prompt() {
        let client = ImageClient::new(&ImageConfig::default()).unwrap();
        let url = client
            .request_url("sunset / lake", Style::Modern, 42)
            .unwrap();
        let text = url.as_str();

        assert!(text.starts_with("https://image.pollinations.ai/prompt/"));
        assert!(text.contains("sunset%20%2F%20lake"));
        assert!(text.contains("width=512"));
        assert!(text.contains("seed=42"));
        assert!(!text.contains(' '));
    }

    #[test]
    fn test_trailing_slash_base() {
        let config = ImageConfig::default().with_pollinations_url("http://localhost:8080/");
        let client = ImageClient::new(&config).unwrap();
        let url = client.request_url("cat", Style::Cartoon, 1).unwrap();
        assert!(url.as_str().starts_with("http://localhost:8080/prompt/cat"));
        assert!(!url.as_str().contains("//prompt"));
        assert!(url.as_str().contains("cartoon%20style"));
    }
}
