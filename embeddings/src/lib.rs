//! # Embeddings
//!
//! This crate turns text into dense vectors for Rataitosk and provides the
//! similarity math the scoring axes are built on.
//!
//! ## Features
//!
//! - **Embedding Providers**: local sentence-transformers models, an HTTP
//!   embeddings API, and a deterministic offline hashing embedder
//! - **Lazy Initialization**: model weights load once, on first use
//! - **Similarity**: cosine similarity, means and full similarity matrices
//! - **Caching**: anchors and chunks shared across axes are embedded once
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings System                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► Embedding ──► similarity                │
//! │       │                    ▲                                    │
//! │       ▼                    │                                    │
//! │  Local/OpenAI/Hash   CachedProvider ◄── EmbeddingCache         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod cache;
pub mod error;
pub mod hash;
#[cfg(feature = "local-model")]
pub mod local;
pub mod provider;
pub mod similarity;

pub use cache::{CacheStats, CachedProvider, EmbeddingCache};
pub use error::{EmbeddingError, Result};
pub use hash::HashProvider;
#[cfg(feature = "local-model")]
pub use local::LocalProvider;
pub use provider::{EmbeddingProvider, OpenAIProvider};
pub use similarity::{cosine_similarity, mean_similarity, normalize, similarity_matrix};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Default sentence-transformers model used for document comparison.
pub const DEFAULT_MODEL: &str = "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";

/// Dimension of [`DEFAULT_MODEL`] vectors.
pub const DEFAULT_DIMENSION: usize = 384;
