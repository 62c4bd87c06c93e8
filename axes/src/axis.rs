//! Built-in axes.
//!
//! Every axis is a variant of [`Axis`]. The registry resolves string
//! identifiers onto variants, so the set of strategies is closed and known
//! at compile time.

use rataitosk_embeddings::EmbeddingProvider;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use crate::anchors;
use crate::error::Result;
use crate::method::{self, ScoringMethod};
use crate::result::AxisResult;
use crate::round2;

/// Error attached to an axis result when a document has nothing to score.
pub const NO_CHUNKS_ERROR: &str = "One or both documents have no chunks.";

/// A comparison axis.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Axis {
    /// Present- versus future-focused language.
    TemporalPositioning,
    /// Present capabilities and operational feasibility language.
    OperationalGrounding,
    /// Future ambitions beyond current capabilities.
    TransformationalVision,
    /// Baseline semantic overlap, no anchor.
    ThematicSimilarity,
}

/// The anchors an axis compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisAnchors {
    /// One pole.
    Single(&'static str),
    /// Two opposing poles; positive scores lean toward `pole_b`.
    Differential {
        pole_a: &'static str,
        pole_b: &'static str,
    },
    /// Documents are compared with each other directly.
    None,
}

impl Axis {
    /// Registry identifier.
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::TemporalPositioning => "Temporal Positioning",
            Self::OperationalGrounding => "Operational Grounding",
            Self::TransformationalVision => "Transformational Vision",
            Self::ThematicSimilarity => "Thematic Similarity",
        }
    }

    pub fn method(self) -> ScoringMethod {
        match self {
            Self::TemporalPositioning => ScoringMethod::DifferentialTwoAnchor,
            Self::OperationalGrounding | Self::TransformationalVision => {
                ScoringMethod::SingleAnchorComparative
            }
            Self::ThematicSimilarity => ScoringMethod::CosineSimilarity,
        }
    }

    pub fn anchors(self) -> AxisAnchors {
        match self {
            Self::TemporalPositioning => AxisAnchors::Differential {
                pole_a: anchors::PRESENT,
                pole_b: anchors::FUTURE,
            },
            Self::OperationalGrounding => AxisAnchors::Single(anchors::OPERATIONAL_GROUNDING),
            Self::TransformationalVision => AxisAnchors::Single(anchors::TRANSFORMATIONAL_VISION),
            Self::ThematicSimilarity => AxisAnchors::None,
        }
    }

    /// Short description of what the anchors stand for.
    pub fn anchor_description(self) -> Option<&'static str> {
        match self {
            Self::TemporalPositioning => Some("Present-focused vs Future-focused language"),
            Self::OperationalGrounding => Some("Present capabilities and operational feasibility"),
            Self::TransformationalVision => Some("Future ambitions beyond current capabilities"),
            Self::ThematicSimilarity => None,
        }
    }

    /// How to read the sign of the score.
    pub fn interpretation(self) -> Option<&'static str> {
        match self {
            Self::TemporalPositioning => Some(concat!(
                "Positive: Doc1 more future-focused. ",
                "Negative: Doc2 more future-focused. ",
                "Near zero: Similar temporal emphasis. ",
                "Measures language patterns, not strategic intent."
            )),
            Self::OperationalGrounding => Some(concat!(
                "Positive: Doc1 more operationally grounded language. ",
                "Negative: Doc2 more operationally grounded language. ",
                "Near zero: Similar operational emphasis. ",
                "Measures language patterns, not actual feasibility."
            )),
            Self::TransformationalVision => Some(concat!(
                "Positive: Doc1 more transformational language. ",
                "Negative: Doc2 more transformational language. ",
                "Near zero: Similar transformational emphasis. ",
                "Measures language patterns, not strategic capacity."
            )),
            Self::ThematicSimilarity => None,
        }
    }

    /// Score two chunked documents on this axis.
    ///
    /// An empty chunk list on either side yields a failed result without
    /// touching the provider. Provider failures are returned as errors for
    /// the caller to attach to this axis.
    pub async fn score(
        self,
        provider: &dyn EmbeddingProvider,
        chunks1: &[String],
        chunks2: &[String],
        name1: &str,
        name2: &str,
    ) -> Result<AxisResult> {
        if chunks1.is_empty() || chunks2.is_empty() {
            return Ok(AxisResult::failed(self.label(), name1, name2, NO_CHUNKS_ERROR)
                .with_id(self.id()));
        }

        debug!(
            "Scoring {} on {} x {} chunks",
            self.id(),
            chunks1.len(),
            chunks2.len()
        );

        let mut pairs = None;
        let raw = match self.anchors() {
            AxisAnchors::Single(anchor) => {
                method::single_anchor(provider, anchor, chunks1, chunks2).await?
            }
            AxisAnchors::Differential { pole_a, pole_b } => {
                method::differential(provider, pole_a, pole_b, chunks1, chunks2).await?
            }
            AxisAnchors::None => {
                let outcome = method::pairwise(provider, chunks1, chunks2).await?;
                pairs = Some((outcome.top, outcome.bottom));
                outcome.score
            }
        };

        let mut result = AxisResult::scored(self.label(), round2(raw), name1, name2, self.method())
            .with_id(self.id())
            .with_chunk_counts(chunks1.len(), chunks2.len());
        result.anchor = self.anchor_description().map(str::to_string);
        result.interpretation = self.interpretation().map(str::to_string);
        if let Some((top, bottom)) = pairs {
            result.top_chunks = Some(top);
            result.bottom_chunks = Some(bottom);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rataitosk_embeddings::HashProvider;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_ids_round_trip() {
        for axis in Axis::iter() {
            assert_eq!(Axis::from_str(axis.id()).unwrap(), axis);
        }
        assert_eq!(Axis::TemporalPositioning.id(), "temporal_positioning");
        assert!(Axis::from_str("sentiment").is_err());
    }

    #[test]
    fn test_directional_axes_describe_anchor() {
        for axis in Axis::iter() {
            assert_eq!(
                axis.anchor_description().is_some(),
                axis.method().is_directional()
            );
        }
    }

    #[tokio::test]
    async fn test_empty_chunks_short_circuit() {
        let provider = HashProvider::new(8);
        let result = Axis::OperationalGrounding
            .score(&provider, &[], &["text".to_string()], "a", "b")
            .await
            .unwrap();

        assert_eq!(result.score, None);
        assert_eq!(result.error.as_deref(), Some(NO_CHUNKS_ERROR));
        assert_eq!(result.id.as_deref(), Some("operational_grounding"));
    }

    #[tokio::test]
    async fn test_pairwise_result_carries_pairs() {
        let provider = HashProvider::new(64);
        let chunks = vec!["shared words here".to_string()];
        let result = Axis::ThematicSimilarity
            .score(&provider, &chunks, &chunks, "a", "b")
            .await
            .unwrap();

        assert_eq!(result.score, Some(100.0));
        assert_eq!(result.method, Some(ScoringMethod::CosineSimilarity));
        assert_eq!(result.top_chunks.as_ref().map(Vec::len), Some(1));
        assert!(result.interpretation.is_none());
    }
}
