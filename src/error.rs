// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitHub API error: {0}")]
    GitHub(String),

    #[error("LLM request failed: {0}")]
    LlmRequest(String),

    #[error("LLM request timed out")]
    LlmTimeout,

    #[error("LLM API returned status {status}")]
    LlmStatus { status: u16 },

    /// The model answered, but not with a usable enrichment object.
    #[error("LLM response could not be parsed: {0}")]
    LlmResponse(String),

    #[error("README decoding failed: {0}")]
    Decode(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl PipelineError {
    /// Whether another attempt at the same request could succeed. Only
    /// timeouts and non-success statuses qualify; a refused or reset
    /// connection fails straight away.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PipelineError::LlmTimeout | PipelineError::LlmStatus { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(PipelineError::LlmStatus { status: 503 }.is_transient());
        assert!(PipelineError::LlmTimeout.is_transient());
        assert!(!PipelineError::LlmRequest("connection refused".to_string()).is_transient());
        assert!(!PipelineError::LlmResponse("not json".to_string()).is_transient());
        assert!(!PipelineError::Config("missing".to_string()).is_transient());
    }
}
