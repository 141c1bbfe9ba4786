use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpenTargetsError>;

#[derive(Debug, Error)]
pub enum OpenTargetsError {
    /// A required argument was missing or empty. Raised before any request is sent.
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Invalid id_type '{0}': expected one of drug, target, disease")]
    InvalidIdType(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status, with the canonical status text.
    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl OpenTargetsError {
    /// Whether the error was detected before any request was sent.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::InvalidIdType(_))
    }
}

/// Structural rendering of a failure: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
}

impl From<&OpenTargetsError> for ErrorResult {
    fn from(err: &OpenTargetsError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl From<OpenTargetsError> for ErrorResult {
    fn from(err: OpenTargetsError) -> Self {
        Self::from(&err)
    }
}
