//! Fixed word lists for keyword analysis.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Common function words excluded from keyword ranking.
///
/// Articles, conjunctions, prepositions, auxiliary verbs, quantifiers, and
/// question words. Entries shorter than three characters can never match a
/// keyword candidate but are kept so the list reads as a whole.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "this",
        "that", "these", "those", "is", "are", "was", "were", "be", "been", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
        "shall", "not", "no", "yes", "all", "any", "each", "every", "some", "many", "much", "more",
        "most", "other", "such", "what", "which", "who", "when", "where", "why", "how", "there",
        "here",
    ]
    .into_iter()
    .collect()
});

/// Whether `word` (already lowercased) is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}
