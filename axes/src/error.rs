//! Error types for axis scoring.

use thiserror::Error;

/// Result type alias for axis operations.
pub type Result<T> = std::result::Result<T, AxisError>;

/// Errors that can occur while resolving or scoring an axis.
#[derive(Error, Debug)]
pub enum AxisError {
    /// No strategy is registered under this identifier.
    #[error("unknown axis: {0}")]
    UnknownAxis(String),

    /// Embedding or similarity failure.
    #[error(transparent)]
    Embedding(#[from] rataitosk_embeddings::EmbeddingError),

    /// Registry could not be read or parsed.
    #[error("registry error: {0}")]
    Registry(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
