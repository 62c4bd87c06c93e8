//! Report persistence and terminal rendering.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rataitosk_engine::{AxisRegistry, AxisResult, ChunkPair, ComparisonReport, ScoringMethod};
use serde::Serialize;

const RESULTS_TEMPLATE: &str = "results.html";
const TPL_RESULTS: &str = include_str!("../templates/results.html");

/// File name for a report written at `now` with the given extension.
pub fn results_file_name(now: DateTime<Local>, extension: &str) -> String {
    format!("results-{}.{extension}", now.format("%Y-%m-%d-%H-%M-%S"))
}

/// Write the report as pretty-printed JSON into `dir`.
pub fn write_json(report: &ComparisonReport, dir: &Path, now: DateTime<Local>) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(report)?;
    write_report_file(dir, results_file_name(now, "json"), json)
}

/// Render the report and write it as a standalone HTML page into `dir`.
pub fn write_html(report: &ComparisonReport, dir: &Path, now: DateTime<Local>) -> Result<PathBuf> {
    let html = render_html(report)?;
    write_report_file(dir, results_file_name(now, "html"), html)
}

fn write_report_file(dir: &Path, file_name: String, contents: String) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Table row for one axis result in the HTML report.
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    axis: &'a str,
    score: String,
    method: Option<ScoringMethod>,
    anchor: Option<&'a str>,
    interpretation: Option<&'a str>,
    error: Option<&'a str>,
    top_chunks: Option<&'a [ChunkPair]>,
    bottom_chunks: Option<&'a [ChunkPair]>,
}

impl<'a> From<&'a AxisResult> for ResultRow<'a> {
    fn from(result: &'a AxisResult) -> Self {
        Self {
            axis: &result.axis,
            score: result.display_score(),
            method: result.method,
            anchor: result.anchor.as_deref(),
            interpretation: result.interpretation.as_deref(),
            error: result.error.as_deref(),
            top_chunks: result.top_chunks.as_deref(),
            bottom_chunks: result.bottom_chunks.as_deref(),
        }
    }
}

/// Render the report through the embedded results template.
///
/// Values are HTML-escaped, so chunk text taken from the documents cannot
/// inject markup.
pub fn render_html(report: &ComparisonReport) -> Result<String> {
    let mut tera = tera::Tera::default();
    tera.add_raw_template(RESULTS_TEMPLATE, TPL_RESULTS)?;

    let info = &report.document_info;
    let rows: Vec<ResultRow<'_>> = report.axis_results.iter().map(ResultRow::from).collect();
    let chunks_processed = info.chunks1_count.unwrap_or(0) + info.chunks2_count.unwrap_or(0);

    let mut context = tera::Context::new();
    context.insert("version", env!("CARGO_PKG_VERSION"));
    context.insert("doc1_name", &info.doc1_name);
    context.insert("doc2_name", &info.doc2_name);
    context.insert("timestamp", &report.metadata.timestamp);
    context.insert("rows", &rows);
    context.insert("hardware", &report.metadata.hardware);
    context.insert(
        "runtime",
        &format!("{:.2}", report.metadata.processing_time_seconds),
    );
    context.insert("chunks_processed", &chunks_processed);

    let html = tera
        .render(RESULTS_TEMPLATE, &context)
        .context("rendering results page")?;
    Ok(html)
}

/// One line per axis, then run metadata.
pub fn summary(report: &ComparisonReport) -> String {
    let info = &report.document_info;
    let width = report
        .axis_results
        .iter()
        .map(|result| result.axis.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{} vs {}", info.doc1_name, info.doc2_name);
    for result in &report.axis_results {
        let _ = write!(out, "  {:<width$}  {:>7}", result.axis, result.display_score());
        if let Some(error) = &result.error {
            let _ = write!(out, "  ({error})");
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Processed in {:.2}s with {}",
        report.metadata.processing_time_seconds, report.metadata.hardware.model_name
    );
    out
}

/// Registry entries with their enabled flag.
pub fn registry_listing(registry: &AxisRegistry) -> String {
    let mut out = String::new();
    for definition in registry.definitions() {
        let mark = if definition.enabled { "x" } else { " " };
        let _ = writeln!(out, "[{mark}] {:<26} {}", definition.id, definition.label);
    }
    out
}
