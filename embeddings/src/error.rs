//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur in the embeddings system.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Provider not configured.
    #[error("embedding provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// The model or API could not be reached over the network.
    #[error("failed to reach embedding model {model}, check the network connection: {message}")]
    Connectivity { model: String, message: String },

    /// The model was reachable but could not be loaded.
    #[error("failed to load embedding model {model}: {message}")]
    ModelLoad { model: String, message: String },

    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Similarity over an empty set of vectors.
    #[error("cannot average similarity over an empty batch")]
    EmptyBatch,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl EmbeddingError {
    /// Whether the failure was caused by the network rather than the model.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Connectivity { .. } => true,
            Self::Http(err) => err.is_connect() || err.is_timeout(),
            _ => false,
        }
    }
}

/// Heuristic used by providers to classify a load failure message.
pub(crate) fn looks_like_connectivity(message: &str) -> bool {
    let lower = message.to_lowercase();
    [
        "connection",
        "connect error",
        "dns",
        "timed out",
        "network",
        "unreachable",
    ]
    .iter()
    .any(|needle| lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_classification() {
        assert!(looks_like_connectivity("Connection refused (os error 111)"));
        assert!(looks_like_connectivity("request timed out"));
        assert!(!looks_like_connectivity("invalid ONNX graph"));
    }

    #[test]
    fn test_is_connectivity() {
        let err = EmbeddingError::Connectivity {
            model: "m".to_string(),
            message: "offline".to_string(),
        };
        assert!(err.is_connectivity());

        let err = EmbeddingError::ModelLoad {
            model: "m".to_string(),
            message: "corrupt weights".to_string(),
        };
        assert!(!err.is_connectivity());
    }
}
