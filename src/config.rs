use crate::error::{InstaGenError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MAX_HASHTAGS: usize = 15;
pub const DEFAULT_STAGE_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_POLLINATIONS_URL: &str = "https://image.pollinations.ai";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=512&h=512&fit=crop";

#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub pollinations_url: String,
    pub width: u32,
    pub height: u32,
    pub min_image_bytes: usize,
    pub stage_timeout: Duration,
    pub enable_remote: bool,
    pub default_image_url: String,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub chat_model: Option<String>,
    pub vision_model: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub history_dir: PathBuf,
    pub max_hashtags: usize,
    pub image: ImageConfig,
    pub openai: Option<OpenAiConfig>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            pollinations_url: DEFAULT_POLLINATIONS_URL.to_string(),
            width: 512,
            height: 512,
            min_image_bytes: 1000,
            stage_timeout: Duration::from_secs(DEFAULT_STAGE_TIMEOUT_SECS),
            enable_remote: true,
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
        }
    }
}

impl ImageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        let pollinations_url =
            env::var("INSTAGEN_POLLINATIONS_URL").unwrap_or(defaults.pollinations_url);
        let size = env::var("INSTAGEN_IMAGE_SIZE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok());
        let min_image_bytes = env::var("INSTAGEN_MIN_IMAGE_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.min_image_bytes);
        let stage_timeout = env::var("INSTAGEN_STAGE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.stage_timeout);
        let enable_remote = !env::var("INSTAGEN_DISABLE_REMOTE")
            .ok()
            .map_or(false, |val| val == "true");

        ImageConfig {
            pollinations_url,
            width: size.unwrap_or(defaults.width),
            height: size.unwrap_or(defaults.height),
            min_image_bytes,
            stage_timeout,
            enable_remote,
            default_image_url: defaults.default_image_url,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }

    pub fn with_pollinations_url(mut self, url: impl Into<String>) -> Self {
        self.pollinations_url = url.into();
        self
    }

    pub fn with_remote(mut self, enabled: bool) -> Self {
        self.enable_remote = enabled;
        self
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            api_key: None,
            base_url: None,
            chat_model: None,
            vision_model: None,
            timeout: None,
        }
    }
}

impl OpenAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when no API key is present, which disables the
    /// remote chat and vision collaborators.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())?;
        let base_url = env::var("OPENAI_BASE_URL").ok();
        let chat_model = env::var("OPENAI_MODEL").ok();
        let vision_model = env::var("OPENAI_VISION_MODEL").ok();

        Some(OpenAiConfig {
            api_key: Some(api_key),
            base_url,
            chat_model,
            vision_model,
            timeout: None,
        })
    }

    pub fn with_credentials(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = Some(model.into());
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_URL)
            .trim_end_matches('/')
    }

    pub fn chat_model(&self) -> &str {
        self.chat_model.as_deref().unwrap_or(DEFAULT_CHAT_MODEL)
    }

    pub fn vision_model(&self) -> &str {
        self.vision_model.as_deref().unwrap_or(DEFAULT_VISION_MODEL)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
            .unwrap_or(Duration::from_secs(DEFAULT_STAGE_TIMEOUT_SECS))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            history_dir: PathBuf::from("."),
            max_hashtags: DEFAULT_MAX_HASHTAGS,
            image: ImageConfig::default(),
            openai: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let history_dir = env::var("INSTAGEN_HISTORY_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let max_hashtags = env::var("INSTAGEN_MAX_HASHTAGS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_HASHTAGS);

        Config {
            history_dir,
            max_hashtags,
            image: ImageConfig::from_env(),
            openai: OpenAiConfig::from_env(),
        }
    }

    pub fn with_history_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.history_dir = dir.into();
        self
    }

    pub fn with_max_hashtags(mut self, max: usize) -> Self {
        self.max_hashtags = max;
        self
    }

    pub fn with_image(mut self, config: ImageConfig) -> Self {
        self.image = config;
        self
    }

    pub fn with_openai(mut self, config: OpenAiConfig) -> Self {
        self.openai = Some(config);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(5..=30).contains(&self.max_hashtags) {
            return Err(InstaGenError::ConfigurationError(format!(
                "max_hashtags must be between 5 and 30, got {}",
                self.max_hashtags
            )));
        }
        if !(64..=2048).contains(&self.image.width) || !(64..=2048).contains(&self.image.height) {
            return Err(InstaGenError::ConfigurationError(format!(
                "image size must be between 64 and 2048 pixels, got {}x{}",
                self.image.width, self.image.height
            )));
        }
        if self.image.stage_timeout.is_zero() {
            return Err(InstaGenError::ConfigurationError(
                "stage timeout must be greater than zero".into(),
            ));
        }
        if let Some(openai) = &self.openai {
            if openai.api_key.as_deref().map_or(true, str::is_empty) {
                return Err(InstaGenError::ConfigurationError(
                    "OpenAI config requires an API key".into(),
                ));
            }
        }
        Ok(())
    }
}
