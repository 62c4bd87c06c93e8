//! # Rataitosk Engine
//!
//! Compares two documents across a registry of semantic axes.
//!
//! ## Pipeline
//!
//! ```text
//! document ──► clean_text ──► SentenceChunker ──► chunks
//!                                                   │
//!                    AxisRegistry ──► Axis::score ◄─┘
//!                                          │
//!                                          ▼
//!                                  ComparisonReport
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rataitosk_engine::{Comparator, RataitoskConfig};
//!
//! let config = RataitoskConfig::load("rataitosk.toml")?;
//! let comparator = Comparator::new(&config)?;
//! let report = comparator.compare_files("input/a.pdf", "input/b.pdf").await;
//! ```

pub mod chunker;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod hardware;
pub mod provider;
pub mod report;

pub use chunker::{ChunkerConfig, SentenceChunker, split_sentences};
pub use config::{EmbeddingConfig, EmbeddingProviderType, OutputConfig, RataitoskConfig};
pub use document::{SourceDocument, clean_text, discover_pdfs, document_name};
pub use engine::{Comparator, ComparatorBuilder};
pub use error::{EngineError, Result};
pub use hardware::HardwareInfo;
pub use provider::build_provider;
pub use report::{ComparisonReport, DocumentInfo, RunMetadata};

// Re-export from dependencies for convenience
pub use rataitosk_axes::{
    Axis, AxisDefinition, AxisRegistry, AxisResult, ChunkPair, ScoringMethod,
};
pub use rataitosk_embeddings::{EmbeddingError, EmbeddingProvider};
