//! Local sentence-transformers provider backed by fastembed (ONNX).
//!
//! The model is loaded lazily: constructing a [`LocalProvider`] is free, the
//! first `encode` downloads (or reads from the local cache) the weights and
//! every later call reuses the same instance. A failed load is not cached:
//! the error goes back to the caller and the next `encode` tries again.

use std::time::Instant;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use crate::Embedding;
use crate::error::{EmbeddingError, Result, looks_like_connectivity};
use crate::provider::EmbeddingProvider;

/// Local embedding provider.
pub struct LocalProvider {
    model_name: String,
    show_progress: bool,
    model: OnceCell<Mutex<TextEmbedding>>,
}

impl LocalProvider {
    /// Create a provider for the given model name. Nothing is loaded yet.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            show_progress: false,
            model: OnceCell::new(),
        }
    }

    /// Show download progress while fetching model weights.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Whether the model has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    async fn loaded(&self) -> Result<&Mutex<TextEmbedding>> {
        self.model
            .get_or_try_init(|| async {
                let variant = resolve_model(&self.model_name)?;
                info!("Loading embedding model: {}", self.model_name);
                let started = Instant::now();

                let options =
                    InitOptions::new(variant).with_show_download_progress(self.show_progress);
                let model = TextEmbedding::try_new(options).map_err(|err| {
                    let message = err.to_string();
                    if looks_like_connectivity(&message) {
                        EmbeddingError::Connectivity {
                            model: self.model_name.clone(),
                            message,
                        }
                    } else {
                        EmbeddingError::ModelLoad {
                            model: self.model_name.clone(),
                            message,
                        }
                    }
                })?;

                info!(
                    "Loaded embedding model in {:.2}s",
                    started.elapsed().as_secs_f64()
                );
                Ok(Mutex::new(model))
            })
            .await
    }
}

#[async_trait]
impl EmbeddingProvider for LocalProvider {
    fn name(&self) -> &str {
        "local"
    }

    fn model(&self) -> &str {
        &self.model_name
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut model = self.loaded().await?.lock().await;
        debug!("Encoding {} texts locally", texts.len());

        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let embeddings = model
            .embed(refs, None)
            .map_err(|err| EmbeddingError::InvalidResponse(err.to_string()))?;

        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "requested {} embeddings, received {}",
                texts.len(),
                embeddings.len()
            )));
        }

        Ok(embeddings)
    }
}

/// Map a sentence-transformers style model name onto a fastembed model.
pub fn resolve_model(name: &str) -> Result<EmbeddingModel> {
    let short = name.rsplit('/').next().unwrap_or(name);
    let model = match short {
        "paraphrase-multilingual-MiniLM-L12-v2" => EmbeddingModel::ParaphraseMLMiniLML12V2,
        "all-MiniLM-L6-v2" => EmbeddingModel::AllMiniLML6V2,
        "all-MiniLM-L12-v2" => EmbeddingModel::AllMiniLML12V2,
        "bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
        "bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
        "multilingual-e5-small" => EmbeddingModel::MultilingualE5Small,
        "multilingual-e5-base" => EmbeddingModel::MultilingualE5Base,
        _ => {
            return Err(EmbeddingError::ModelLoad {
                model: name.to_string(),
                message: "model is not available as a local ONNX model".to_string(),
            });
        }
    };
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_model() {
        assert!(matches!(
            resolve_model(crate::DEFAULT_MODEL),
            Ok(EmbeddingModel::ParaphraseMLMiniLML12V2)
        ));
        assert!(matches!(
            resolve_model("all-MiniLM-L6-v2"),
            Ok(EmbeddingModel::AllMiniLML6V2)
        ));
    }

    #[test]
    fn test_resolve_unknown_model() {
        let err = resolve_model("acme/unknown-model").unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelLoad { .. }));
        assert!(!err.is_connectivity());
    }

    #[test]
    fn test_construction_is_lazy() {
        let provider = LocalProvider::new(crate::DEFAULT_MODEL);
        assert!(!provider.is_loaded());
    }

    #[tokio::test]
    async fn test_failed_load_is_attempted_again() {
        let provider = LocalProvider::new("acme/unknown-model");
        let texts = vec!["hello".to_string()];

        for _ in 0..2 {
            let err = provider.encode(&texts).await.unwrap_err();
            assert!(matches!(err, EmbeddingError::ModelLoad { .. }));
            assert!(!provider.is_loaded());
        }
    }
}
