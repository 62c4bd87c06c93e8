//! Deterministic offline embedder.
//!
//! Feature-hashes lower-cased word tokens into a fixed number of buckets.
//! Texts sharing vocabulary land close together, which is enough for smoke
//! runs and tests without downloading model weights.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::Embedding;
use crate::error::Result;
use crate::provider::EmbeddingProvider;

/// Bag-of-words hashing provider.
#[derive(Debug, Clone)]
pub struct HashProvider {
    dimension: usize,
    model: String,
}

impl HashProvider {
    /// Create a provider producing vectors of `dimension` components.
    pub fn new(dimension: usize) -> Self {
        let dimension = dimension.max(1);
        Self {
            dimension,
            model: format!("hash-{dimension}"),
        }
    }

    /// Dimension of produced vectors.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed one text synchronously.
    pub fn embed_text(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let digest = Sha256::digest(token.to_lowercase().as_bytes());
            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&digest[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimension as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        vector
    }
}

impl Default for HashProvider {
    fn default() -> Self {
        Self::new(crate::DEFAULT_DIMENSION)
    }
}

#[async_trait]
impl EmbeddingProvider for HashProvider {
    fn name(&self) -> &str {
        "hash"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::cosine_similarity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deterministic() {
        let provider = HashProvider::new(64);
        let a = provider.embed_text("Future goals shape the organisation.");
        let b = provider.embed_text("Future goals shape the organisation.");
        assert_eq!(a, b);
    }

    #[test]
    fn test_case_insensitive() {
        let provider = HashProvider::new(64);
        assert_eq!(provider.embed_text("Future"), provider.embed_text("future"));
    }

    #[test]
    fn test_shared_vocabulary_is_closer() {
        let provider = HashProvider::new(256);
        let base = provider.embed_text("long term priorities and emerging possibilities");
        let near = provider.embed_text("emerging possibilities and long term priorities ahead");
        let far = provider.embed_text("invoice totals reconciled quarterly by finance staff");

        let near_sim = cosine_similarity(&base, &near).unwrap();
        let far_sim = cosine_similarity(&base, &far).unwrap();
        assert!(near_sim > far_sim);
    }

    #[tokio::test]
    async fn test_encode_batch_order() {
        let provider = HashProvider::new(32);
        let texts = vec!["alpha".to_string(), "beta".to_string()];
        let vectors = provider.encode(&texts).await.unwrap();

        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], provider.embed_text("alpha"));
        assert_eq!(vectors[1], provider.embed_text("beta"));
    }
}
