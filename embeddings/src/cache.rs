//! In-memory embedding cache.
//!
//! Axes embed the same anchors on every run and several axes embed the same
//! document chunks, so a provider wrapped in [`CachedProvider`] only ever
//! encodes a given text once per model.

use std::collections::{HashMap, HashSet, VecDeque};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::provider::EmbeddingProvider;

type CacheKey = (String, String);

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, Embedding>,
    /// Insertion order, oldest first.
    order: VecDeque<CacheKey>,
}

/// Bounded cache of embeddings keyed by model and text.
pub struct EmbeddingCache {
    state: RwLock<CacheState>,

    /// Maximum cache size.
    max_entries: usize,
}

impl EmbeddingCache {
    /// Create a new in-memory cache.
    pub fn new(max_entries: usize) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            max_entries: max_entries.max(1),
        }
    }

    fn key(text: &str, model: &str) -> CacheKey {
        (model.to_string(), text.to_string())
    }

    /// Get an embedding from the cache.
    pub async fn get(&self, text: &str, model: &str) -> Option<Embedding> {
        let state = self.state.read().await;
        state.entries.get(&Self::key(text, model)).cloned()
    }

    /// Put an embedding in the cache, evicting the oldest entry when full.
    pub async fn put(&self, text: &str, model: &str, embedding: Embedding) {
        let key = Self::key(text, model);
        let mut state = self.state.write().await;

        if state.entries.contains_key(&key) {
            state.entries.insert(key, embedding);
            return;
        }

        while state.entries.len() >= self.max_entries {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.entries.remove(&oldest);
                }
                None => break,
            }
        }

        state.order.push_back(key.clone());
        state.entries.insert(key, embedding);
    }

    /// Check if an embedding is cached.
    pub async fn contains(&self, text: &str, model: &str) -> bool {
        self.state
            .read()
            .await
            .entries
            .contains_key(&Self::key(text, model))
    }

    /// Get cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.read().await;
        CacheStats {
            entries: state.entries.len(),
            max_entries: self.max_entries,
            models: state
                .entries
                .keys()
                .map(|(model, _)| model.clone())
                .collect::<HashSet<_>>()
                .into_iter()
                .collect(),
        }
    }
}

/// Statistics about the embedding cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of entries in cache.
    pub entries: usize,

    /// Maximum cache size.
    pub max_entries: usize,

    /// Models with cached embeddings.
    pub models: Vec<String>,
}

/// A provider wrapper that serves repeated texts from an [`EmbeddingCache`].
pub struct CachedProvider<P> {
    provider: P,
    cache: EmbeddingCache,
}

impl<P> CachedProvider<P>
where
    P: EmbeddingProvider,
{
    /// Create a new cached provider.
    pub fn new(provider: P, cache: EmbeddingCache) -> Self {
        Self { provider, cache }
    }

    /// Get the underlying cache.
    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    /// Get the wrapped provider.
    pub fn inner(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P> EmbeddingProvider for CachedProvider<P>
where
    P: EmbeddingProvider,
{
    fn name(&self) -> &str {
        self.provider.name()
    }

    fn model(&self) -> &str {
        self.provider.model()
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let model = self.provider.model();
        let mut slots: Vec<Option<Embedding>> = Vec::with_capacity(texts.len());
        let mut missing: Vec<String> = Vec::new();
        let mut missing_positions: Vec<usize> = Vec::new();

        for (position, text) in texts.iter().enumerate() {
            let cached = self.cache.get(text, model).await;
            if cached.is_none() {
                missing.push(text.clone());
                missing_positions.push(position);
            }
            slots.push(cached);
        }

        debug!(
            "Embedding cache: {} hits, {} misses",
            texts.len() - missing.len(),
            missing.len()
        );

        if !missing.is_empty() {
            let fresh = self.provider.encode(&missing).await?;
            if fresh.len() != missing.len() {
                return Err(EmbeddingError::InvalidResponse(format!(
                    "requested {} embeddings, received {}",
                    missing.len(),
                    fresh.len()
                )));
            }

            for ((position, text), embedding) in
                missing_positions.into_iter().zip(&missing).zip(fresh)
            {
                self.cache.put(text, model, embedding.clone()).await;
                slots[position] = Some(embedding);
            }
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| EmbeddingError::InvalidResponse("missing embedding".to_string()))
            })
            .collect()
    }
}
