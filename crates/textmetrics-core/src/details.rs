//! Word and sentence length details.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;

/// Length statistics for a piece of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailMetrics {
    /// Alphanumeric characters per whitespace word.
    pub average_word_length: f64,
    /// Longest alphanumeric word (first one wins ties), empty if none.
    pub longest_word: String,
    /// Whitespace words per sentence, rounded to one decimal.
    pub average_sentence_length: f64,
}

/// Compute detail metrics given the basic word and sentence counts of `text`.
///
/// The average word length divides the summed length of the alphanumeric
/// words by the whitespace word count, so punctuation-only tokens add to the
/// denominator but not the numerator.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn analyze_details(text: &str, words: usize, sentences: usize) -> DetailMetrics {
    let alnum = text::alnum_words(text);

    let average_word_length = if words > 0 {
        let letters: usize = alnum.iter().map(|w| text::char_len(w)).sum();
        letters as f64 / words as f64
    } else {
        0.0
    };

    let mut longest_word = "";
    let mut longest_len = 0;
    for &word in &alnum {
        let len = text::char_len(word);
        if len > longest_len {
            longest_word = word;
            longest_len = len;
        }
    }

    let average_sentence_length = if sentences > 0 {
        round1(words as f64 / sentences as f64)
    } else {
        0.0
    };

    DetailMetrics {
        average_word_length,
        longest_word: longest_word.to_string(),
        average_sentence_length,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
