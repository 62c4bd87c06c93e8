//! Subcommand handlers.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use rataitosk_engine::{AxisRegistry, Comparator, RataitoskConfig, build_provider, discover_pdfs};
use tracing::{info, warn};

use crate::OutputFormat;
use crate::output;

const PROBE_SENTENCE: &str = "Rataitosk installation check.";

/// Load the configuration from `explicit`, else from `fallback` when it
/// exists, else defaults.
pub fn load_config(explicit: Option<&Path>, fallback: &str) -> Result<RataitoskConfig> {
    match explicit {
        Some(path) => RataitoskConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None if Path::new(fallback).is_file() => {
            RataitoskConfig::load(fallback).with_context(|| format!("loading {fallback}"))
        }
        None => Ok(RataitoskConfig::default()),
    }
}

/// Resolve the two documents to compare, falling back to the input
/// directory.
pub fn resolve_documents(
    config: &RataitoskConfig,
    doc1: Option<PathBuf>,
    doc2: Option<PathBuf>,
) -> Result<(PathBuf, PathBuf)> {
    if let (Some(doc1), Some(doc2)) = (doc1, doc2) {
        return Ok((doc1, doc2));
    }

    let input_dir = &config.output.input_dir;
    info!("No documents given, looking for PDFs in {}", input_dir.display());
    let found = discover_pdfs(input_dir)
        .with_context(|| format!("reading input directory {}", input_dir.display()))?;
    match <[PathBuf; 2]>::try_from(found) {
        Ok([doc1, doc2]) => {
            info!("Using {} and {}", doc1.display(), doc2.display());
            Ok((doc1, doc2))
        }
        Err(_) => bail!(
            "could not find two PDFs in {}; pass --doc1 and --doc2",
            input_dir.display()
        ),
    }
}

pub async fn compare(
    config: &RataitoskConfig,
    doc1: Option<PathBuf>,
    doc2: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let (doc1, doc2) = resolve_documents(config, doc1, doc2)?;
    let comparator = Comparator::new(config)?;

    info!("Running comparison");
    let report = comparator.compare_files(&doc1, &doc2).await;

    if let Some(message) = report.critical_error() {
        eprintln!("Analysis failed: {message}");
        return Ok(ExitCode::FAILURE);
    }

    print!("{}", output::summary(&report));

    let now = chrono::Local::now();
    if format.writes_json() {
        let path = output::write_json(&report, &config.output.dir, now)?;
        info!("JSON report written to {}", path.display());
        if !format.writes_html() {
            println!("OUTPUT_PATH:{}", path.display());
        }
    }
    if format.writes_html() {
        let path = output::write_html(&report, &config.output.dir, now)?;
        println!("OUTPUT_PATH:{}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

pub fn axes(config: &RataitoskConfig) -> Result<ExitCode> {
    let registry = match &config.registry_path {
        Some(path) => AxisRegistry::try_load(path)?,
        None => AxisRegistry::builtin(),
    };
    if registry.definitions().is_empty() {
        warn!("Registry is empty");
    }
    print!("{}", output::registry_listing(&registry));
    Ok(ExitCode::SUCCESS)
}

pub async fn check(config: &RataitoskConfig) -> Result<ExitCode> {
    let provider = build_provider(&config.embedding)?;

    let started = Instant::now();
    let vector = provider
        .encode_one(PROBE_SENTENCE)
        .await
        .with_context(|| format!("encoding with {}", provider.model()))?;
    let elapsed = started.elapsed();

    println!("provider:  {}", provider.name());
    println!("model:     {}", provider.model());
    println!("dimension: {}", vector.len());
    println!("load time: {:.2}s", elapsed.as_secs_f64());
    Ok(ExitCode::SUCCESS)
}
