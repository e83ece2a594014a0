use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstaGenError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Image error: {0}")]
    ImageError(String),
}

impl InstaGenError {
    /// Stage-level failures that a fallback chain is allowed to absorb.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            InstaGenError::NetworkFailure(_)
                | InstaGenError::Timeout(_)
                | InstaGenError::ResponseError(_)
                | InstaGenError::ImageError(_)
        )
    }
}

impl From<reqwest::Error> for InstaGenError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            InstaGenError::Timeout(e.to_string())
        } else {
            InstaGenError::NetworkFailure(e.to_string())
        }
    }
}

impl From<serde_json::Error> for InstaGenError {
    fn from(e: serde_json::Error) -> Self {
        InstaGenError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for InstaGenError {
    fn from(e: std::io::Error) -> Self {
        InstaGenError::IoError(e.to_string())
    }
}

impl From<image::ImageError> for InstaGenError {
    fn from(e: image::ImageError) -> Self {
        InstaGenError::ImageError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InstaGenError>;
