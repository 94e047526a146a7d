//! Error types for the transformation pipeline

use thiserror::Error;

/// Errors that can occur while turning a Markdown document into a payload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The Markdown source could not be turned into a syntax tree
    #[error("Parse error: {0}")]
    Parse(String),
    /// An embedded markup fragment could not be lowered into elements
    #[error("Malformed raw markup {fragment:?}: {reason}")]
    RawMarkup { fragment: String, reason: String },
    /// The frontmatter block is not a key/value mapping
    #[error("Frontmatter error: {0}")]
    Frontmatter(String),
    /// Payload or page index (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A Markdown extension was requested by a name nobody registered
    #[error("Extension '{0}' not found")]
    ExtensionNotFound(String),
}

impl From<serde_json::Error> for TransformError {
    fn from(err: serde_json::Error) -> Self {
        TransformError::Serialization(err.to_string())
    }
}
