//! Scoring orchestrator.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rataitosk_axes::{AxisDefinition, AxisRegistry, AxisResult, round2};
use rataitosk_embeddings::EmbeddingProvider;
use tracing::{error, info, warn};

use crate::chunker::{ChunkerConfig, SentenceChunker};
use crate::config::RataitoskConfig;
use crate::document::{SourceDocument, document_name};
use crate::error::Result;
use crate::hardware::HardwareInfo;
use crate::provider::build_provider;
use crate::report::{
    ALL_AXES, ComparisonReport, DocumentInfo, NO_AXES, NO_AXES_ERROR, NO_VALID_CHUNKS_ERROR,
    RunMetadata,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compares two documents across every enabled axis.
///
/// A comparison never fails: run-level problems (no chunks, no axes) become
/// a single synthetic result, and a failing axis becomes an error entry for
/// that axis while the remaining axes still run. Axes run one after another
/// against the one shared provider.
pub struct Comparator {
    /// Embedding provider shared by all axes.
    provider: Arc<dyn EmbeddingProvider>,

    /// Sentence-window chunker.
    chunker: SentenceChunker,

    /// Where the axes to run come from.
    registry: RegistrySource,

    /// Whether to probe the host for report metadata.
    probe_hardware: bool,
}

impl Comparator {
    /// Create a new comparator builder.
    pub fn builder() -> ComparatorBuilder {
        ComparatorBuilder::new()
    }

    /// Create a comparator from configuration.
    pub fn new(config: &RataitoskConfig) -> Result<Self> {
        Self::builder().with_config(config.clone()).build()
    }

    /// The registry as it stands now. A registry file is re-read on every
    /// call, so edits apply to the next comparison without a rebuild.
    pub fn registry(&self) -> AxisRegistry {
        match &self.registry {
            RegistrySource::Fixed(registry) => registry.clone(),
            RegistrySource::File(path) => AxisRegistry::load(path),
            RegistrySource::Builtin => AxisRegistry::builtin(),
        }
    }

    /// Chunk one document's text.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.chunker.chunk(text)
    }

    /// Load two documents from disk and compare them.
    ///
    /// An extraction failure is reported as the synthetic `ALL` result.
    pub async fn compare_files(
        &self,
        doc1: impl AsRef<Path>,
        doc2: impl AsRef<Path>,
    ) -> ComparisonReport {
        let started = Instant::now();
        let (doc1, doc2) = (doc1.as_ref(), doc2.as_ref());

        match (SourceDocument::load(doc1), SourceDocument::load(doc2)) {
            (Ok(doc1), Ok(doc2)) => self.compare_since(started, &doc1, &doc2).await,
            (Err(err), _) | (_, Err(err)) => {
                error!("Chunking failed: {err}");
                let mut report = self.empty_report(
                    doc1.to_string_lossy().to_string(),
                    doc2.to_string_lossy().to_string(),
                );
                report.axis_results.push(AxisResult::failed(
                    ALL_AXES,
                    &report.document_info.doc1_name,
                    &report.document_info.doc2_name,
                    format!("Chunking failed: {err}"),
                ));
                finish(report, started)
            }
        }
    }

    /// Compare two loaded documents.
    pub async fn compare(&self, doc1: &SourceDocument, doc2: &SourceDocument) -> ComparisonReport {
        self.compare_since(Instant::now(), doc1, doc2).await
    }

    /// Compare with the processing time measured from `started`.
    async fn compare_since(
        &self,
        started: Instant,
        doc1: &SourceDocument,
        doc2: &SourceDocument,
    ) -> ComparisonReport {
        let mut report = self.empty_report(doc1.path.clone(), doc2.path.clone());
        report.document_info.doc1_name = doc1.name.clone();
        report.document_info.doc2_name = doc2.name.clone();

        info!("Chunking documents");
        let chunks1 = self.chunk(&doc1.text);
        let chunks2 = self.chunk(&doc2.text);

        if chunks1.is_empty() || chunks2.is_empty() {
            warn!(
                "{NO_VALID_CHUNKS_ERROR} ({}: {}, {}: {})",
                doc1.name,
                chunks1.len(),
                doc2.name,
                chunks2.len()
            );
            report.axis_results.push(AxisResult::failed(
                ALL_AXES,
                &doc1.name,
                &doc2.name,
                NO_VALID_CHUNKS_ERROR,
            ));
            return finish(report, started);
        }

        report.document_info.chunks1_count = Some(chunks1.len());
        report.document_info.chunks2_count = Some(chunks2.len());

        info!("Loading axis registry");
        let axes = self.registry().enabled();
        if axes.is_empty() {
            warn!("{NO_AXES_ERROR}");
            report.axis_results.push(AxisResult::failed(
                NO_AXES,
                &doc1.name,
                &doc2.name,
                NO_AXES_ERROR,
            ));
            return finish(report, started);
        }

        for definition in &axes {
            let result = self
                .score_axis(definition, &chunks1, &chunks2, &doc1.name, &doc2.name)
                .await;
            report.axis_results.push(result);
        }

        let report = finish(report, started);
        info!(
            "Processing completed in {} seconds",
            report.metadata.processing_time_seconds
        );
        report
    }

    async fn score_axis(
        &self,
        definition: &AxisDefinition,
        chunks1: &[String],
        chunks2: &[String],
        name1: &str,
        name2: &str,
    ) -> AxisResult {
        info!("Scoring axis: {} ({})", definition.label, definition.id);

        let scored = match AxisRegistry::resolve(definition) {
            Ok(axis) => {
                axis.score(self.provider.as_ref(), chunks1, chunks2, name1, name2)
                    .await
            }
            Err(err) => Err(err),
        };

        match scored {
            Ok(mut result) => {
                result.axis = definition.label.clone();
                result.id = Some(definition.id.clone());
                result
            }
            Err(err) => {
                error!("Axis '{}' failed: {err}", definition.id);
                AxisResult::failed(&definition.label, name1, name2, err.to_string())
                    .with_id(&definition.id)
            }
        }
    }

    fn empty_report(&self, doc1_path: String, doc2_path: String) -> ComparisonReport {
        let hardware = if self.probe_hardware {
            HardwareInfo::collect(self.provider.model())
        } else {
            HardwareInfo::unknown(self.provider.model())
        };

        ComparisonReport {
            axis_results: Vec::new(),
            metadata: RunMetadata {
                hardware,
                processing_time_seconds: 0.0,
                timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            },
            document_info: DocumentInfo {
                doc1_name: document_name(&doc1_path),
                doc2_name: document_name(&doc2_path),
                doc1_path,
                doc2_path,
                chunks1_count: None,
                chunks2_count: None,
            },
        }
    }
}

/// Where a comparator takes its axes from.
#[derive(Debug, Clone)]
enum RegistrySource {
    Fixed(AxisRegistry),
    File(PathBuf),
    Builtin,
}

fn finish(mut report: ComparisonReport, started: Instant) -> ComparisonReport {
    report.metadata.processing_time_seconds = round2(started.elapsed().as_secs_f64());
    report
}

/// Builder for [`Comparator`].
pub struct ComparatorBuilder {
    config: RataitoskConfig,
    provider: Option<Arc<dyn EmbeddingProvider>>,
    registry: Option<AxisRegistry>,
    probe_hardware: bool,
}

impl ComparatorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: RataitoskConfig::default(),
            provider: None,
            registry: None,
            probe_hardware: true,
        }
    }

    /// Use a full configuration.
    pub fn with_config(mut self, config: RataitoskConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an already constructed provider instead of the configured one.
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the chunking configuration.
    pub fn with_chunking(mut self, chunking: ChunkerConfig) -> Self {
        self.config.chunking = chunking;
        self
    }

    /// Use an explicit registry instead of the configured one.
    pub fn with_registry(mut self, registry: AxisRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Enable or disable host probing for report metadata.
    pub fn with_hardware_probe(mut self, enabled: bool) -> Self {
        self.probe_hardware = enabled;
        self
    }

    /// Build the comparator.
    pub fn build(self) -> Result<Comparator> {
        self.config.validate()?;

        let provider = match self.provider {
            Some(provider) => provider,
            None => build_provider(&self.config.embedding)?,
        };
        let registry = match (self.registry, self.config.registry_path) {
            (Some(registry), _) => RegistrySource::Fixed(registry),
            (None, Some(path)) => RegistrySource::File(path),
            (None, None) => RegistrySource::Builtin,
        };

        Ok(Comparator {
            provider,
            chunker: SentenceChunker::with_config(self.config.chunking),
            registry,
            probe_hardware: self.probe_hardware,
        })
    }
}

impl Default for ComparatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rataitosk_embeddings::HashProvider;

    fn comparator(registry: AxisRegistry) -> Comparator {
        Comparator::builder()
            .with_provider(Arc::new(HashProvider::new(64)))
            .with_chunking(ChunkerConfig {
                chunk_size: 2,
                min_chunk_length: 10,
            })
            .with_registry(registry)
            .with_hardware_probe(false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = Comparator::builder()
            .with_provider(Arc::new(HashProvider::new(8)))
            .with_chunking(ChunkerConfig {
                chunk_size: 0,
                min_chunk_length: 10,
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_uses_builtin_registry() {
        let comparator = Comparator::builder()
            .with_provider(Arc::new(HashProvider::new(8)))
            .build()
            .unwrap();
        assert_eq!(comparator.registry().enabled().len(), 4);
    }

    #[tokio::test]
    async fn test_document_info_records_chunk_counts() {
        let comparator = comparator(AxisRegistry::builtin());
        let doc1 = SourceDocument::new("in/one.pdf", "First sentence here. Second sentence here. Third one.");
        let doc2 = SourceDocument::new("in/two.pdf", "Another document entirely.");

        let report = comparator.compare(&doc1, &doc2).await;

        assert_eq!(report.document_info.doc1_name, "one");
        assert_eq!(report.document_info.chunks1_count, Some(2));
        assert_eq!(report.document_info.chunks2_count, Some(1));
        assert_eq!(report.axis_results.len(), 4);
        assert_eq!(report.metadata.timestamp.len(), 19);
    }

    #[tokio::test]
    async fn test_processing_time_counts_from_the_given_start() {
        let comparator = comparator(AxisRegistry::builtin());
        let doc1 = SourceDocument::new("in/one.pdf", "First sentence here. Second sentence here.");
        let doc2 = SourceDocument::new("in/two.pdf", "Another document entirely.");
        let Some(started) = Instant::now().checked_sub(std::time::Duration::from_secs(2)) else {
            return;
        };

        let report = comparator.compare_since(started, &doc1, &doc2).await;

        assert!(report.metadata.processing_time_seconds >= 2.0);
        assert!(report.critical_error().is_none());
    }

    #[tokio::test]
    async fn test_scored_results_carry_the_registry_label() {
        let comparator = comparator(AxisRegistry::new(vec![AxisDefinition::new(
            "temporal_positioning",
            "Time Horizon",
        )]));
        let doc1 = SourceDocument::new("in/one.pdf", "First sentence here. Second sentence here.");
        let doc2 = SourceDocument::new("in/two.pdf", "Another document entirely.");

        let report = comparator.compare(&doc1, &doc2).await;

        assert_eq!(report.axis_results.len(), 1);
        assert!(report.axis_results[0].score.is_some());
        assert_eq!(report.axis_results[0].axis, "Time Horizon");
        assert_eq!(
            report.axis_results[0].id.as_deref(),
            Some("temporal_positioning")
        );
    }
}
