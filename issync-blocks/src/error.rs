//! Error types for conversion operations

use thiserror::Error;

/// Errors that can occur while turning issues into Notion payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The Markdown contained a construct with no Notion block mapping
    #[error("Unsupported node type: {kind}")]
    UnsupportedNode { kind: String },
    /// Issue JSON did not match the expected GitHub shape
    #[error("Invalid issue: {0}")]
    InvalidIssue(String),
    /// Error while producing JSON output
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ConvertError {
    pub(crate) fn unsupported(kind: impl Into<String>) -> Self {
        ConvertError::UnsupportedNode { kind: kind.into() }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Serialization(err.to_string())
    }
}
