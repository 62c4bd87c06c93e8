//! # Scoring Axes
//!
//! An axis is one named dimension along which two documents are compared,
//! such as present- versus future-oriented language. Each axis embeds a
//! handful of hand-written reference texts ("anchors") and turns the
//! similarity of every document chunk to those anchors into one relative
//! score.
//!
//! ## Scoring shapes
//!
//! - **Single anchor**: `(mean_sim(doc1, anchor) - mean_sim(doc2, anchor)) * 100`
//! - **Differential**: per document `mean_sim(B) - mean_sim(A)`, then
//!   `(emphasis(doc1) - emphasis(doc2)) * 100`
//! - **Pairwise**: no anchor, mean of the full chunk-to-chunk similarity
//!   matrix `* 100`
//!
//! Positive directional scores mean document 1 leans further toward the
//! axis pole, negative scores mean document 2 does.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rataitosk_axes::{AxisRegistry, Axis};
//!
//! let registry = AxisRegistry::builtin();
//! for definition in registry.enabled() {
//!     let axis = AxisRegistry::resolve(&definition)?;
//!     let result = axis.score(&provider, &chunks1, &chunks2, "A", "B").await?;
//! }
//! ```

pub mod anchors;
pub mod axis;
pub mod error;
pub mod method;
pub mod registry;
pub mod result;

pub use axis::Axis;
pub use error::{AxisError, Result};
pub use method::{PairwiseOutcome, ScoringMethod};
pub use registry::{AxisDefinition, AxisRegistry};
pub use result::{AxisResult, ChunkPair};

/// Round a score to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
