//! Axis result records.

use serde::{Deserialize, Serialize};

use crate::method::ScoringMethod;

/// Outcome of scoring one axis for a pair of documents.
///
/// Exactly one of `score` and `error` is present. `score` always
/// serializes, as `null` when the axis failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisResult {
    /// Human-readable axis label (or `ALL` / `NONE` for run-level failures).
    pub axis: String,

    /// Axis identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Relative score, rounded to two decimals.
    pub score: Option<f64>,

    /// Name of document 1.
    pub doc1: String,

    /// Name of document 2.
    pub doc2: String,

    /// Scoring method tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<ScoringMethod>,

    /// Short description of the anchor pole(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    /// Number of chunks in document 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks1: Option<usize>,

    /// Number of chunks in document 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks2: Option<usize>,

    /// How to read the sign of the score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,

    /// Most similar chunk pairs, ascending (pairwise axes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_chunks: Option<Vec<ChunkPair>>,

    /// Least similar chunk pairs, ascending (pairwise axes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_chunks: Option<Vec<ChunkPair>>,

    /// Why the axis produced no score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AxisResult {
    /// A successful result.
    pub fn scored(
        axis: impl Into<String>,
        score: f64,
        doc1: impl Into<String>,
        doc2: impl Into<String>,
        method: ScoringMethod,
    ) -> Self {
        Self {
            axis: axis.into(),
            id: None,
            score: Some(score),
            doc1: doc1.into(),
            doc2: doc2.into(),
            method: Some(method),
            anchor: None,
            chunks1: None,
            chunks2: None,
            interpretation: None,
            top_chunks: None,
            bottom_chunks: None,
            error: None,
        }
    }

    /// A failed result carrying an explanation and no score.
    pub fn failed(
        axis: impl Into<String>,
        doc1: impl Into<String>,
        doc2: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            axis: axis.into(),
            id: None,
            score: None,
            doc1: doc1.into(),
            doc2: doc2.into(),
            method: None,
            anchor: None,
            chunks1: None,
            chunks2: None,
            interpretation: None,
            top_chunks: None,
            bottom_chunks: None,
            error: Some(error.into()),
        }
    }

    /// Set the axis identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Record chunk counts.
    pub fn with_chunk_counts(mut self, chunks1: usize, chunks2: usize) -> Self {
        self.chunks1 = Some(chunks1);
        self.chunks2 = Some(chunks2);
        self
    }

    /// Whether this axis failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Score formatted for display, `n/a` when missing.
    pub fn display_score(&self) -> String {
        match self.score {
            Some(score) => format!("{score:+.2}"),
            None => "n/a".to_string(),
        }
    }
}

/// One doc1 chunk paired with one doc2 chunk and their similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkPair {
    /// Chunk from document 1.
    pub doc1_chunk: String,

    /// Chunk from document 2.
    pub doc2_chunk: String,

    /// Cosine similarity of the two chunks.
    pub similarity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_failed_serializes_null_score() {
        let result = AxisResult::failed("ALL", "a", "b", "no chunks");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["score"], serde_json::Value::Null);
        assert_eq!(json["error"], "no chunks");
        assert!(json.get("method").is_none());
    }

    #[test]
    fn test_scored_has_no_error() {
        let result = AxisResult::scored(
            "Temporal Positioning",
            1.5,
            "a",
            "b",
            ScoringMethod::DifferentialTwoAnchor,
        )
        .with_id("temporal_positioning")
        .with_chunk_counts(3, 4);

        assert!(!result.is_error());
        assert_eq!(result.display_score(), "+1.50");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["method"], "differential_two_anchor");
        assert_eq!(json["chunks2"], 4);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_display_missing_score() {
        let result = AxisResult::failed("NONE", "a", "b", "nothing enabled");
        assert_eq!(result.display_score(), "n/a");
    }
}
