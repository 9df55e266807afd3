//! Basic word, character, sentence, and paragraph counts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;

/// Raw counts for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BasicCounts {
    /// Whitespace-delimited words.
    pub words: usize,
    /// Every character, whitespace and newlines included.
    ///
    /// Counted in Unicode scalar values: `"😀"` is 1, not the 2 UTF-16 code
    /// units a JavaScript `length` would report.
    pub characters: usize,
    /// Fragments between runs of `.`, `!`, `?`.
    pub sentences: usize,
    /// Blocks separated by blank lines.
    pub paragraphs: usize,
}

/// Count words, characters, sentences, and paragraphs.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn count(text: &str) -> BasicCounts {
    BasicCounts {
        words: text::split_words(text).len(),
        characters: text.chars().count(),
        sentences: text::split_sentences(text).len(),
        paragraphs: text::split_paragraphs(text).len(),
    }
}
