//! Text processing utilities.
//!
//! Splits text into the token sequences the analyzers consume: whitespace
//! words, sentences, paragraphs, and alphanumeric words.
//!
//! Empty and whitespace-only input is treated as "no content": every
//! splitter returns an empty list rather than a single empty fragment.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of sentence terminators (`.`, `!`, `?`).
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// A blank line: newline, optional whitespace (BOM included), newline.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[\s\x{FEFF}]*\n").expect("valid regex"));

/// Maximal runs of ASCII word characters.
static ALNUM_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid regex"));

/// Whitespace as text inputs see it: Unicode whitespace plus the byte
/// order mark, which editors leave at the start of otherwise empty files.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Whether `text` is empty or only whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim_matches(is_space).is_empty()
}

/// Split text into whitespace-delimited words.
///
/// Punctuation stays attached: `"world."` is one word and `"--"` is a word.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(is_space).filter(|w| !w.is_empty()).collect()
}

/// Split text into sentences on runs of `.`, `!`, or `?`.
///
/// Fragments are returned as they appear in the source (leading whitespace
/// included); fragments that are empty after trimming are dropped.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<&str> {
    if is_blank(text) {
        return Vec::new();
    }

    SENTENCE_BREAK
        .split(text)
        .filter(|s| !is_blank(s))
        .collect()
}

/// Split text into paragraphs separated by blank lines.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    if is_blank(text) {
        return Vec::new();
    }

    PARAGRAPH_BREAK
        .split(text)
        .filter(|p| !is_blank(p))
        .collect()
}

/// Extract alphanumeric words (`[A-Za-z0-9_]+`) in scan order.
///
/// Case is preserved; callers lowercase the input first when they need
/// case-insensitive tokens. Punctuation-only tokens produce nothing.
pub fn alnum_words(text: &str) -> Vec<&str> {
    ALNUM_WORD.find_iter(text).map(|m| m.as_str()).collect()
}

/// Length of a word in characters.
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}
