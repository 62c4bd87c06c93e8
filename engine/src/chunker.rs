//! Sentence-window chunking.
//!
//! Text is split into sentences on Unicode sentence boundaries (UAX #29).
//! Consecutive windows of `chunk_size` sentences are joined into one chunk.
//! Windows partition the sentence list; they never overlap or slide, and a
//! window whose joined text is shorter than `min_chunk_length` characters
//! is dropped without carrying its sentences forward.

use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Configuration for the chunker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Sentences per chunk.
    pub chunk_size: usize,

    /// Minimum chunk length in characters.
    pub min_chunk_length: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 4,
            min_chunk_length: 100,
        }
    }
}

/// Splits document text into sentence-window chunks.
#[derive(Debug, Clone, Default)]
pub struct SentenceChunker {
    config: ChunkerConfig,
}

impl SentenceChunker {
    /// Create a chunker with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chunker with custom configuration.
    pub fn with_config(config: ChunkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Chunk text content.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let sentences = split_sentences(text);
        let chunks = self.chunk_sentences(&sentences);
        debug!(
            "Chunked {} sentences into {} chunks",
            sentences.len(),
            chunks.len()
        );
        chunks
    }

    /// Group pre-split sentences into chunks.
    pub fn chunk_sentences<S: AsRef<str>>(&self, sentences: &[S]) -> Vec<String> {
        sentences
            .chunks(self.config.chunk_size.max(1))
            .filter_map(|window| {
                let kept: Vec<&str> = window
                    .iter()
                    .map(|sentence| sentence.as_ref().trim())
                    .filter(|sentence| !sentence.is_empty())
                    .collect();
                if kept.is_empty() {
                    return None;
                }

                let chunk = kept.join(" ");
                (chunk.chars().count() >= self.config.min_chunk_length).then_some(chunk)
            })
            .collect()
    }
}

/// Split text into trimmed, non-empty sentences.
///
/// A single line break inside a paragraph is treated as a space, so text
/// wrapped by the extractor does not end a sentence mid-line. Blank lines
/// still separate sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let unwrapped = unwrap_lines(text);
    unwrapped
        .split_sentence_bounds()
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(str::to_string)
        .collect()
}

fn unwrap_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut previous = None;

    while let Some(c) = chars.next() {
        let lone_break =
            c == '\n' && previous != Some('\n') && chars.peek().is_some_and(|next| *next != '\n');
        out.push(if lone_break { ' ' } else { c });
        previous = Some(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunker(chunk_size: usize, min_chunk_length: usize) -> SentenceChunker {
        SentenceChunker::with_config(ChunkerConfig {
            chunk_size,
            min_chunk_length,
        })
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First one. Second one!  Third?");
        assert_eq!(sentences, vec!["First one.", "Second one!", "Third?"]);
    }

    #[test]
    fn test_wrapped_lines_join() {
        let sentences = split_sentences("A sentence that\nwraps here. Next.\n\nNew paragraph");
        assert_eq!(
            sentences,
            vec!["A sentence that wraps here.", "Next.", "New paragraph"]
        );
    }

    #[test]
    fn test_windows_partition() {
        let sentences = ["a1.", "a2.", "b1.", "b2.", "c1."];
        let chunks = chunker(2, 1).chunk_sentences(&sentences);
        assert_eq!(chunks, vec!["a1. a2.", "b1. b2.", "c1."]);
    }

    #[test]
    fn test_blank_sentences_dropped_inside_window() {
        let sentences = ["one.", "   ", "two."];
        let chunks = chunker(3, 1).chunk_sentences(&sentences);
        assert_eq!(chunks, vec!["one. two."]);
    }

    #[test]
    fn test_short_windows_dropped_without_carry_over() {
        let sentences = ["tiny.", "x.", "this window is long enough.", "ok."];
        let chunks = chunker(2, 15).chunk_sentences(&sentences);
        assert_eq!(chunks, vec!["this window is long enough. ok."]);
    }

    #[test]
    fn test_min_length_counts_characters() {
        let sentences = ["äöü."];
        assert_eq!(chunker(1, 4).chunk_sentences(&sentences), vec!["äöü."]);
        assert!(chunker(1, 5).chunk_sentences(&sentences).is_empty());
    }

    #[test]
    fn test_every_chunk_meets_min_length() {
        let text = "Short. ".repeat(10) + &"A considerably longer sentence sits here. ".repeat(10);
        let chunker = chunker(3, 60);
        for chunk in chunker.chunk(&text) {
            assert!(chunk.chars().count() >= 60, "{chunk}");
        }
    }

    #[test]
    fn test_fewer_sentences_than_window() {
        let text = "Only one sentence, but it is long enough to survive the minimum length.";
        assert_eq!(chunker(4, 20).chunk(text), vec![text.to_string()]);
        assert!(chunker(4, 200).chunk(text).is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert!(SentenceChunker::new().chunk("").is_empty());
        assert!(SentenceChunker::new().chunk(" \n\n ").is_empty());
    }
}
