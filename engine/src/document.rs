//! Source documents: text extraction and cleanup.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{EngineError, Result};

/// A document loaded for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Where the document came from.
    pub path: String,

    /// Display name.
    pub name: String,

    /// Cleaned text.
    pub text: String,
}

impl SourceDocument {
    /// Create a document from text that is already extracted.
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: document_name(&path),
            path,
            text: text.into(),
        }
    }

    /// Load and clean a document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = extract_text(path)?;
        let text = clean_text(&raw);
        info!(
            "Loaded {} ({} characters)",
            path.display(),
            text.chars().count()
        );
        Ok(Self::new(path.to_string_lossy(), text))
    }
}

/// Display name for a path: the file name without directory or `.pdf`
/// suffix.
pub fn document_name(path: &str) -> String {
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());
    file_name
        .strip_suffix(".pdf")
        .map(str::to_string)
        .unwrap_or(file_name)
}

/// Whether a path names a PDF file.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Extract raw text. PDFs go through `pdf-extract`; anything else is read
/// as UTF-8.
pub fn extract_text(path: &Path) -> Result<String> {
    let extraction_error = |message: String| EngineError::Extraction {
        path: path.display().to_string(),
        message,
    };

    if is_pdf(path) {
        let bytes = std::fs::read(path).map_err(|err| extraction_error(err.to_string()))?;
        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|err| extraction_error(err.to_string()))?;
        debug!("Extracted {} bytes of text from {}", text.len(), path.display());
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(|err| extraction_error(err.to_string()))
    }
}

/// Normalize extracted text.
///
/// Form feeds become spaces and every other control character except the
/// newline is removed. Runs of three or more newlines then collapse to two,
/// and runs of two or more spaces collapse to one.
pub fn clean_text(raw: &str) -> String {
    let mut text: String = raw
        .chars()
        .filter_map(|c| match c {
            '\x0C' => Some(' '),
            '\n' => Some('\n'),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();

    if let Ok(re) = regex_lite::Regex::new(r"\n{3,}") {
        text = re.replace_all(&text, "\n\n").into_owned();
    }
    if let Ok(re) = regex_lite::Regex::new(r" {2,}") {
        text = re.replace_all(&text, " ").into_owned();
    }

    text
}

/// The first two PDF files in a directory, in file name order.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_pdf(path))
        .collect();
    pdfs.sort();
    pdfs.truncate(2);
    Ok(pdfs)
}
