//! Comparison report.

use rataitosk_axes::AxisResult;
use serde::{Deserialize, Serialize};

use crate::hardware::HardwareInfo;

/// Axis label of the synthetic result for a run that could not chunk its
/// documents.
pub const ALL_AXES: &str = "ALL";

/// Axis label of the synthetic result for a run with no enabled axes.
pub const NO_AXES: &str = "NONE";

pub const NO_VALID_CHUNKS_ERROR: &str = "One or both documents produced no valid chunks";
pub const NO_AXES_ERROR: &str = "No axes enabled in registry";

/// Everything one comparison produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// One entry per enabled axis, or a single synthetic failure.
    pub axis_results: Vec<AxisResult>,

    /// Run metadata.
    pub metadata: RunMetadata,

    /// Identities of the compared documents.
    pub document_info: DocumentInfo,
}

impl ComparisonReport {
    /// The message of a run-level failure, if the report is one.
    pub fn critical_error(&self) -> Option<&str> {
        match self.axis_results.as_slice() {
            [only] if only.axis == ALL_AXES || only.axis == NO_AXES => only.error.as_deref(),
            _ => None,
        }
    }

    /// Results that carry a score.
    pub fn scored(&self) -> impl Iterator<Item = &AxisResult> {
        self.axis_results.iter().filter(|result| !result.is_error())
    }

    /// Results that failed.
    pub fn failures(&self) -> impl Iterator<Item = &AxisResult> {
        self.axis_results.iter().filter(|result| result.is_error())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub hardware: HardwareInfo,

    /// Wall-clock duration of the run, rounded to two decimals.
    pub processing_time_seconds: f64,

    /// Local start time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub doc1_path: String,
    pub doc2_path: String,
    pub doc1_name: String,
    pub doc2_name: String,

    /// Chunk counts, present once both documents chunked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks1_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks2_count: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rataitosk_axes::ScoringMethod;

    fn report(axis_results: Vec<AxisResult>) -> ComparisonReport {
        ComparisonReport {
            axis_results,
            metadata: RunMetadata {
                hardware: HardwareInfo::unknown("hash-8"),
                processing_time_seconds: 0.12,
                timestamp: "2026-01-02 03:04:05".to_string(),
            },
            document_info: DocumentInfo {
                doc1_path: "input/a.pdf".to_string(),
                doc2_path: "input/b.pdf".to_string(),
                doc1_name: "a".to_string(),
                doc2_name: "b".to_string(),
                chunks1_count: None,
                chunks2_count: None,
            },
        }
    }

    #[test]
    fn test_critical_error() {
        let failed = report(vec![AxisResult::failed(ALL_AXES, "a", "b", NO_VALID_CHUNKS_ERROR)]);
        assert_eq!(failed.critical_error(), Some(NO_VALID_CHUNKS_ERROR));

        let axis_failure = report(vec![AxisResult::failed("Temporal Positioning", "a", "b", "boom")]);
        assert_eq!(axis_failure.critical_error(), None);
        assert_eq!(axis_failure.failures().count(), 1);
    }

    #[test]
    fn test_stable_keys() {
        let report = report(vec![AxisResult::scored(
            "Thematic Similarity",
            42.0,
            "a",
            "b",
            ScoringMethod::CosineSimilarity,
        )]);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["axis_results"].is_array());
        assert_eq!(json["metadata"]["processing_time_seconds"], 0.12);
        assert_eq!(json["metadata"]["hardware"]["model_name"], "hash-8");
        assert_eq!(json["document_info"]["doc2_name"], "b");
        assert!(json["document_info"].get("chunks1_count").is_none());
        assert_eq!(report.scored().count(), 1);
    }
}
