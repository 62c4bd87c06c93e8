//! Embedding provider construction from configuration.

use std::sync::Arc;

use rataitosk_embeddings::{
    CachedProvider, DEFAULT_MODEL, EmbeddingCache, EmbeddingProvider, HashProvider,
    OpenAIProvider,
};
use tracing::info;

use crate::config::{EmbeddingConfig, EmbeddingProviderType};
use crate::error::Result;

/// Build the configured provider, wrapped in a cache when enabled.
///
/// Construction is cheap: a local model is not loaded until the first
/// `encode` call.
pub fn build_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.provider {
        EmbeddingProviderType::Local => local_provider(config)?,
        EmbeddingProviderType::OpenAI => {
            let mut provider = OpenAIProvider::new();
            if let Ok(key) = std::env::var(&config.api_key_env) {
                provider = provider.with_api_key(key);
            }
            if let Some(url) = &config.api_base_url {
                provider = provider.with_base_url(url.clone());
            }
            if config.model != DEFAULT_MODEL {
                provider = provider.with_model(config.model.clone());
            }
            cached(provider, config)
        }
        EmbeddingProviderType::Hash => cached(HashProvider::new(config.hash_dimension), config),
    };

    info!(
        "Using {} embedding provider ({})",
        provider.name(),
        provider.model()
    );
    Ok(provider)
}

fn cached<P>(provider: P, config: &EmbeddingConfig) -> Arc<dyn EmbeddingProvider>
where
    P: EmbeddingProvider + 'static,
{
    if config.cache_enabled {
        Arc::new(CachedProvider::new(
            provider,
            EmbeddingCache::new(config.cache_max_entries),
        ))
    } else {
        Arc::new(provider)
    }
}

#[cfg(feature = "local-model")]
fn local_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider = rataitosk_embeddings::LocalProvider::new(config.model.clone())
        .with_progress(config.show_progress);
    Ok(cached(provider, config))
}

#[cfg(not(feature = "local-model"))]
fn local_provider(_config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    Err(rataitosk_embeddings::EmbeddingError::ProviderNotConfigured(
        "local models need the `local-model` feature; rebuild with it or set embedding.provider"
            .to_string(),
    )
    .into())
}
