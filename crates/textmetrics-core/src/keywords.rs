//! Keyword frequency and density.
//!
//! Candidates are lowercased alphanumeric words of three or more characters
//! that are not stop words. The ten most frequent candidates are reported
//! with their share of all candidates.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;
use crate::word_lists::is_stop_word;

/// Maximum number of keywords reported.
pub const KEYWORD_LIMIT: usize = 10;

/// Shortest word considered as a keyword.
pub const MIN_KEYWORD_LEN: usize = 3;

/// A keyword and how many times it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Keyword {
    /// Lowercased keyword.
    pub word: String,
    /// Occurrences in the text.
    pub count: usize,
}

/// A keyword's share of all keyword candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordDensity {
    /// Lowercased keyword.
    pub word: String,
    /// Percentage of candidates, rounded to one decimal.
    pub percentage: f64,
}

/// Keyword analysis result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordReport {
    /// Top keywords, most frequent first.
    pub keywords: Vec<Keyword>,
    /// Density for each entry of `keywords`, same order.
    pub density: Vec<KeywordDensity>,
    /// Candidates left after stop-word removal (the density denominator).
    pub filtered_total: usize,
}

impl KeywordReport {
    /// Whether no keywords survived filtering.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Rank the most frequent keywords in `text`.
///
/// Equal counts keep the order in which the words first appear.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn analyze_keywords(text: &str) -> KeywordReport {
    let lowered = text.to_lowercase();
    let candidates: Vec<&str> = text::alnum_words(&lowered)
        .into_iter()
        .filter(|w| text::char_len(w) >= MIN_KEYWORD_LEN && !is_stop_word(w))
        .collect();

    let filtered_total = candidates.len();
    if filtered_total == 0 {
        return KeywordReport::default();
    }

    // First-occurrence order, with an index for O(1) updates.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for word in candidates {
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    // Stable sort keeps first-occurrence order among ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(KEYWORD_LIMIT);

    let total = filtered_total as f64;
    let density = counts
        .iter()
        .map(|(word, count)| KeywordDensity {
            word: (*word).to_string(),
            percentage: round1(*count as f64 / total * 100.0),
        })
        .collect();
    let keywords = counts
        .into_iter()
        .map(|(word, count)| Keyword {
            word: word.to_string(),
            count,
        })
        .collect();

    tracing::debug!(filtered_total, "keywords ranked");

    KeywordReport {
        keywords,
        density,
        filtered_total,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(report: &KeywordReport) -> Vec<(&str, usize)> {
        report
            .keywords
            .iter()
            .map(|k| (k.word.as_str(), k.count))
            .collect()
    }

    #[test]
    fn ranks_by_frequency() {
        let report = analyze_keywords("dog dog cat cat cat bird");
        assert_eq!(pairs(&report), vec![("cat", 3), ("dog", 2), ("bird", 1)]);
        assert_eq!(report.filtered_total, 6);
        assert_eq!(report.density[0].word, "cat");
        assert_eq!(report.density[0].percentage, 50.0);
        assert_eq!(report.density[1].percentage, 33.3);
        assert_eq!(report.density[2].percentage, 16.7);
    }

    #[test]
    fn case_insensitive_counting() {
        let report = analyze_keywords("Rust rust RUST");
        assert_eq!(pairs(&report), vec![("rust", 3)]);
    }

    #[test]
    fn stop_words_and_short_words_are_dropped() {
        let report = analyze_keywords("The cat and the dog sat by a tree which is here");
        assert_eq!(
            pairs(&report),
            vec![("cat", 1), ("dog", 1), ("sat", 1), ("tree", 1)]
        );
        // Denominator counts only the surviving candidates.
        assert_eq!(report.filtered_total, 4);
        assert_eq!(report.density[0].percentage, 25.0);
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let report = analyze_keywords("zebra apple mango apple zebra mango");
        assert_eq!(
            pairs(&report),
            vec![("zebra", 2), ("apple", 2), ("mango", 2)]
        );
    }

    #[test]
    fn truncates_to_ten() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima \
                    lima kilo";
        let report = analyze_keywords(text);
        assert_eq!(report.keywords.len(), KEYWORD_LIMIT);
        assert_eq!(report.density.len(), KEYWORD_LIMIT);
        assert_eq!(report.keywords[0].word, "kilo");
        assert_eq!(report.keywords[1].word, "lima");
        assert_eq!(report.filtered_total, 14);
    }

    #[test]
    fn punctuation_splits_candidates() {
        let report = analyze_keywords("well-known, well-known; snake_case!");
        assert_eq!(
            pairs(&report),
            vec![("well", 2), ("known", 2), ("snake_case", 1)]
        );
    }

    #[test]
    fn only_stop_words_is_empty() {
        let report = analyze_keywords("the and which where there");
        assert!(report.is_empty());
        assert!(report.density.is_empty());
        assert_eq!(report.filtered_total, 0);
    }

    #[test]
    fn empty_text_is_empty() {
        assert_eq!(analyze_keywords("   "), KeywordReport::default());
    }
}
