//! The metrics engine.
//!
//! [`analyze`] is the single entry point hosts call with the current text.
//! It runs every analyzer over the same input and returns a fresh
//! [`MetricsSnapshot`]. The engine holds no state: identical input always
//! yields an identical snapshot.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::counts;
use crate::details;
use crate::keywords::{self, Keyword, KeywordDensity};
use crate::readability::{self, ReadingLevel};

/// Every metric derived from one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricsSnapshot {
    /// Whitespace-delimited words.
    pub word_count: usize,
    /// Every character, whitespace included, in Unicode scalar values.
    pub character_count: usize,
    /// Sentences split on `.`, `!`, `?`.
    pub sentence_count: usize,
    /// Paragraphs split on blank lines.
    pub paragraph_count: usize,
    /// Minutes to read at 200 words per minute, rounded up.
    pub reading_minutes: usize,
    /// Minutes to speak at 130 words per minute, rounded up.
    pub speaking_minutes: usize,
    /// Reading level band from the Flesch score.
    pub reading_level: ReadingLevel,
    /// Alphanumeric characters per whitespace word.
    pub average_word_length: f64,
    /// Longest alphanumeric word, empty if none.
    pub longest_word: String,
    /// Words per sentence, rounded to one decimal.
    pub average_sentence_length: f64,
    /// Up to ten keywords, most frequent first.
    pub keywords: Vec<Keyword>,
    /// Density of each keyword, aligned with `keywords`.
    pub keyword_density: Vec<KeywordDensity>,
}

impl MetricsSnapshot {
    /// Whether the text had no words at all.
    pub const fn is_empty(&self) -> bool {
        self.word_count == 0
    }
}

/// Derive every metric for `text`.
///
/// Total for all inputs: empty or whitespace-only text produces zero counts,
/// an empty keyword list, an empty longest word, and
/// [`ReadingLevel::Undetermined`].
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn analyze(text: &str) -> MetricsSnapshot {
    let counts = counts::count(text);
    let readability = readability::estimate(text, counts.words, counts.sentences);
    let keywords = keywords::analyze_keywords(text);
    let details = details::analyze_details(text, counts.words, counts.sentences);

    tracing::debug!(
        words = counts.words,
        sentences = counts.sentences,
        level = %readability.level,
        "text analyzed"
    );

    MetricsSnapshot {
        word_count: counts.words,
        character_count: counts.characters,
        sentence_count: counts.sentences,
        paragraph_count: counts.paragraphs,
        reading_minutes: readability.reading_minutes,
        speaking_minutes: readability.speaking_minutes,
        reading_level: readability.level,
        average_word_length: details.average_word_length,
        longest_word: details.longest_word,
        average_sentence_length: details.average_sentence_length,
        keywords: keywords.keywords,
        keyword_density: keywords.density,
    }
}
