//! Configuration for the comparison engine.

use std::path::{Path, PathBuf};

use rataitosk_embeddings::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

use crate::chunker::ChunkerConfig;
use crate::error::{EngineError, Result};

/// Top-level configuration, usually read from `rataitosk.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RataitoskConfig {
    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,

    /// Chunking configuration.
    pub chunking: ChunkerConfig,

    /// Registry file replacing the built-in axis list.
    pub registry_path: Option<PathBuf>,

    /// Input and output locations.
    pub output: OutputConfig,
}

impl RataitoskConfig {
    /// Read a TOML configuration file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| {
            EngineError::Config(format!("cannot read {}: {err}", path.display()))
        })?;
        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    /// Parse a TOML configuration string and validate it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the chunking configuration.
    pub fn with_chunking(mut self, config: ChunkerConfig) -> Self {
        self.chunking = config;
        self
    }

    /// Use a registry file instead of the built-in axis list.
    pub fn with_registry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_path = Some(path.into());
        self
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(EngineError::Config(
                "chunking.chunk_size must be a positive integer".to_string(),
            ));
        }
        if self.chunking.min_chunk_length == 0 {
            return Err(EngineError::Config(
                "chunking.min_chunk_length must be a positive integer".to_string(),
            ));
        }
        if self.embedding.cache_enabled && self.embedding.cache_max_entries == 0 {
            return Err(EngineError::Config(
                "embedding.cache_max_entries must be positive when the cache is enabled"
                    .to_string(),
            ));
        }
        if self.embedding.provider == EmbeddingProviderType::Hash
            && self.embedding.hash_dimension == 0
        {
            return Err(EngineError::Config(
                "embedding.hash_dimension must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the embedding provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Which provider to use.
    pub provider: EmbeddingProviderType,

    /// Model to embed with.
    pub model: String,

    /// Show progress while downloading model weights.
    pub show_progress: bool,

    /// Whether to cache embeddings in memory.
    pub cache_enabled: bool,

    /// Maximum cache size.
    pub cache_max_entries: usize,

    /// Base URL of the embeddings API (`openai` provider).
    pub api_base_url: Option<String>,

    /// Environment variable holding the API key (`openai` provider).
    pub api_key_env: String,

    /// Vector dimension (`hash` provider).
    pub hash_dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderType::Local,
            model: DEFAULT_MODEL.to_string(),
            show_progress: true,
            cache_enabled: true,
            cache_max_entries: 10000,
            api_base_url: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            hash_dimension: rataitosk_embeddings::DEFAULT_DIMENSION,
        }
    }
}

/// Type of embedding provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderType {
    /// Local ONNX sentence-transformers model.
    Local,
    /// OpenAI-compatible embeddings API.
    #[serde(rename = "openai")]
    OpenAI,
    /// Deterministic offline hashing embedder.
    Hash,
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where result files are written.
    pub dir: PathBuf,

    /// Where documents are looked up when none are given.
    pub input_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            input_dir: PathBuf::from("input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RataitoskConfig::default();
        assert_eq!(config.chunking.chunk_size, 4);
        assert_eq!(config.chunking.min_chunk_length, 100);
        assert_eq!(config.embedding.provider, EmbeddingProviderType::Local);
        assert_eq!(config.embedding.model, DEFAULT_MODEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RataitoskConfig::from_toml(
            r#"
            registry_path = "axes/registry.json"

            [embedding]
            provider = "hash"
            hash_dimension = 64

            [chunking]
            chunk_size = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.embedding.provider, EmbeddingProviderType::Hash);
        assert_eq!(config.embedding.hash_dimension, 64);
        assert!(config.embedding.cache_enabled);
        assert_eq!(config.chunking.chunk_size, 2);
        assert_eq!(config.chunking.min_chunk_length, 100);
        assert_eq!(
            config.registry_path,
            Some(PathBuf::from("axes/registry.json"))
        );
    }

    #[test]
    fn test_openai_tag() {
        let config = RataitoskConfig::from_toml("[embedding]\nprovider = \"openai\"\n").unwrap();
        assert_eq!(config.embedding.provider, EmbeddingProviderType::OpenAI);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = RataitoskConfig::from_toml("[chunking]\nchunk_size = 0\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = RataitoskConfig::from_toml("[embedding]\nprovider = \"magic\"\n").unwrap_err();
        assert!(matches!(err, EngineError::Toml(_)));
    }
}
