pub mod classifier;
pub mod generator;
pub mod seed;
pub mod templates;

pub use classifier::{classify, classify_value, Classifier};
pub use generator::{parse_sectioned_reply, ContentGenerator, ContentOrigin, GeneratedContent};
pub use seed::stable_hash;
pub use templates::{TemplateFamily, TemplateResolver};
