//! Scoring templates shared by every axis.
//!
//! Scores are returned unrounded and already scaled by 100; callers round
//! once when building the result record.

use ordered_float::OrderedFloat;
use rataitosk_embeddings::{
    Embedding, EmbeddingError, EmbeddingProvider, mean_similarity, similarity_matrix,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::result::ChunkPair;

/// How an axis turns similarities into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    /// One anchor, difference of mean similarities.
    SingleAnchorComparative,
    /// Two opposing anchors, difference of per-document emphasis.
    DifferentialTwoAnchor,
    /// No anchor, mean chunk-to-chunk similarity.
    CosineSimilarity,
}

impl ScoringMethod {
    /// Whether the score is a signed comparison between the documents.
    pub fn is_directional(self) -> bool {
        !matches!(self, Self::CosineSimilarity)
    }
}

/// Number of extreme chunk pairs surfaced by the pairwise method.
pub const EXTREME_PAIRS: usize = 10;

/// Encode `texts`, failing unless the provider returned one vector per text.
async fn embed_exact(provider: &dyn EmbeddingProvider, texts: &[String]) -> Result<Vec<Embedding>> {
    let embeddings = provider.encode(texts).await?;
    if embeddings.len() != texts.len() {
        return Err(EmbeddingError::InvalidResponse(format!(
            "{} returned {} embeddings for {} texts",
            provider.model(),
            embeddings.len(),
            texts.len()
        ))
        .into());
    }
    Ok(embeddings)
}

async fn embed_anchor(provider: &dyn EmbeddingProvider, anchor: &str) -> Result<Embedding> {
    let mut vectors = embed_exact(provider, &[anchor.to_string()]).await?;
    vectors
        .pop()
        .ok_or_else(|| EmbeddingError::InvalidResponse("no anchor embedding".to_string()).into())
}

/// `(mean_sim(doc1, anchor) - mean_sim(doc2, anchor)) * 100`.
pub async fn single_anchor(
    provider: &dyn EmbeddingProvider,
    anchor: &str,
    chunks1: &[String],
    chunks2: &[String],
) -> Result<f64> {
    let anchor_vector = embed_anchor(provider, anchor).await?;
    let emb1 = embed_exact(provider, chunks1).await?;
    let emb2 = embed_exact(provider, chunks2).await?;

    let sim1 = mean_similarity(&emb1, &anchor_vector)?;
    let sim2 = mean_similarity(&emb2, &anchor_vector)?;
    debug!("Single anchor similarity: doc1={sim1:.4} doc2={sim2:.4}");

    Ok((sim1 - sim2) * 100.0)
}

/// Per document `mean_sim(pole_b) - mean_sim(pole_a)`, then
/// `(emphasis(doc1) - emphasis(doc2)) * 100`.
pub async fn differential(
    provider: &dyn EmbeddingProvider,
    pole_a: &str,
    pole_b: &str,
    chunks1: &[String],
    chunks2: &[String],
) -> Result<f64> {
    let vector_a = embed_anchor(provider, pole_a).await?;
    let vector_b = embed_anchor(provider, pole_b).await?;
    let emb1 = embed_exact(provider, chunks1).await?;
    let emb2 = embed_exact(provider, chunks2).await?;

    let emphasis1 = mean_similarity(&emb1, &vector_b)? - mean_similarity(&emb1, &vector_a)?;
    let emphasis2 = mean_similarity(&emb2, &vector_b)? - mean_similarity(&emb2, &vector_a)?;
    debug!("Differential emphasis: doc1={emphasis1:.4} doc2={emphasis2:.4}");

    Ok((emphasis1 - emphasis2) * 100.0)
}

/// Outcome of anchorless pairwise scoring.
#[derive(Debug, Clone)]
pub struct PairwiseOutcome {
    /// Mean of the similarity matrix, scaled by 100.
    pub score: f64,

    /// Highest-similarity pairs, ascending.
    pub top: Vec<ChunkPair>,

    /// Lowest-similarity pairs, ascending.
    pub bottom: Vec<ChunkPair>,
}

/// Mean of the full doc1 x doc2 similarity matrix, scaled by 100.
///
/// Both documents are embedded in a single batch.
pub async fn pairwise(
    provider: &dyn EmbeddingProvider,
    chunks1: &[String],
    chunks2: &[String],
) -> Result<PairwiseOutcome> {
    let all_chunks: Vec<String> = chunks1.iter().chain(chunks2).cloned().collect();
    let embeddings = embed_exact(provider, &all_chunks).await?;
    let (emb1, emb2) = embeddings.split_at(chunks1.len());

    let matrix = similarity_matrix(emb1, emb2)?;

    let mut scored: Vec<(OrderedFloat<f32>, usize, usize)> =
        Vec::with_capacity(chunks1.len() * chunks2.len());
    let mut total = 0.0f64;
    for (i, row) in matrix.iter().enumerate() {
        for (j, &similarity) in row.iter().enumerate() {
            total += f64::from(similarity);
            scored.push((OrderedFloat(similarity), i, j));
        }
    }

    if scored.is_empty() {
        return Err(EmbeddingError::EmptyBatch.into());
    }
    let score = total / scored.len() as f64 * 100.0;

    // Stable: equal similarities keep row-major order.
    scored.sort_by_key(|(similarity, _, _)| *similarity);

    let to_pair = |&(similarity, i, j): &(OrderedFloat<f32>, usize, usize)| ChunkPair {
        doc1_chunk: chunks1[i].clone(),
        doc2_chunk: chunks2[j].clone(),
        similarity: f64::from(similarity.0),
    };
    let bottom = scored.iter().take(EXTREME_PAIRS).map(to_pair).collect();
    let top = scored[scored.len().saturating_sub(EXTREME_PAIRS)..]
        .iter()
        .map(to_pair)
        .collect();

    Ok(PairwiseOutcome { score, top, bottom })
}
