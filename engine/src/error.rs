//! Error types for the comparison engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur in the comparison engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Document text could not be extracted.
    #[error("extraction failed for {path}: {message}")]
    Extraction { path: String, message: String },

    /// Embedding error.
    #[error("embedding error: {0}")]
    Embedding(#[from] rataitosk_embeddings::EmbeddingError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
