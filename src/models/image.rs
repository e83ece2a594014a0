use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    RemoteAi,
    RemoteStatic,
    LocalSynthetic,
    FallbackDefault,
}

impl ImageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSource::RemoteAi => "remote_ai",
            ImageSource::RemoteStatic => "remote_static",
            ImageSource::LocalSynthetic => "local_synthetic",
            ImageSource::FallbackDefault => "fallback_default",
        }
    }

    /// True for every tier below the remote AI generator.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, ImageSource::RemoteAi)
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageReference {
    Inline {
        mime_type: String,
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
    },
    Uri {
        uri: String,
    },
}

impl ImageReference {
    pub fn uri(uri: impl Into<String>) -> Self {
        ImageReference::Uri { uri: uri.into() }
    }

    pub fn inline(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        ImageReference::Inline {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// A URI usable directly in an `<img src>`: inline payloads become data URIs.
    pub fn to_display_uri(&self) -> String {
        match self {
            ImageReference::Inline { mime_type, data } => format!(
                "data:{};base64,{}",
                mime_type,
                general_purpose::STANDARD.encode(data)
            ),
            ImageReference::Uri { uri } => uri.clone(),
        }
    }

    pub fn inline_bytes(&self) -> Option<&[u8]> {
        match self {
            ImageReference::Inline { data, .. } => Some(data),
            ImageReference::Uri { .. } => None,
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ImageReference::Inline { mime_type, .. } => match mime_type.as_str() {
                "image/png" => "png",
                "image/webp" => "webp",
                "image/gif" => "gif",
                _ => "jpg",
            },
            ImageReference::Uri { .. } => "url",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub source: ImageSource,
    pub reference: ImageReference,
    pub seed: u64,
}

mod base64_bytes {
    use base64::{engine::general_purpose, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&general_purpose::STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
