//! Readability estimation using the Flesch Reading Ease formula.
//!
//! Formula: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/word)`
//!
//! Higher score = easier text. The score is mapped onto a [`ReadingLevel`]
//! band; text without words or sentences has no score and reads as
//! [`ReadingLevel::Undetermined`].
//!
//! Syllables come from a vowel-cluster heuristic, not a dictionary, so the
//! numbers are reproducible across hosts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;

/// Average silent reading speed in words per minute.
pub const READING_WPM: usize = 200;

/// Average speaking speed in words per minute.
pub const SPEAKING_WPM: usize = 130;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Reading level band derived from the Flesch score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingLevel {
    /// Score of 90 or above.
    Elementary,
    /// Score in `[80, 90)`.
    MiddleSchool,
    /// Score in `[70, 80)`.
    HighSchool,
    /// Score in `[60, 70)`.
    College,
    /// Score in `[50, 60)`.
    Graduate,
    /// Score below 50.
    PostGraduate,
    /// No words or no sentences to score.
    Undetermined,
}

impl ReadingLevel {
    /// Map a Flesch score onto its band. Bands are checked high to low.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Elementary
        } else if score >= 80.0 {
            Self::MiddleSchool
        } else if score >= 70.0 {
            Self::HighSchool
        } else if score >= 60.0 {
            Self::College
        } else if score >= 50.0 {
            Self::Graduate
        } else {
            Self::PostGraduate
        }
    }

    /// Human-readable label; `"-"` for [`ReadingLevel::Undetermined`].
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Elementary => "Elementary",
            Self::MiddleSchool => "Middle School",
            Self::HighSchool => "High School",
            Self::College => "College",
            Self::Graduate => "Graduate",
            Self::PostGraduate => "Post-Graduate",
            Self::Undetermined => "-",
        }
    }
}

impl std::fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of readability estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Minutes to read silently, rounded up.
    pub reading_minutes: usize,
    /// Minutes to read aloud, rounded up.
    pub speaking_minutes: usize,
    /// Mean syllables per alphanumeric word.
    pub average_syllables: f64,
    /// Flesch Reading Ease score, when the text has words and sentences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Band for `score`.
    pub level: ReadingLevel,
}

/// Estimate readability given the basic word and sentence counts of `text`.
///
/// `words` and `sentences` are the whitespace word count and sentence count;
/// syllables are averaged over the alphanumeric words of `text`.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn estimate(text: &str, words: usize, sentences: usize) -> ReadabilityReport {
    let average_syllables = average_syllables(text);
    let score = flesch_score(words, sentences, average_syllables);
    let level = score.map_or(ReadingLevel::Undetermined, ReadingLevel::from_score);

    ReadabilityReport {
        reading_minutes: reading_minutes(words),
        speaking_minutes: speaking_minutes(words),
        average_syllables,
        score,
        level,
    }
}

/// Minutes to read `words` silently.
pub const fn reading_minutes(words: usize) -> usize {
    words.div_ceil(READING_WPM)
}

/// Minutes to read `words` aloud.
pub const fn speaking_minutes(words: usize) -> usize {
    words.div_ceil(SPEAKING_WPM)
}

/// Flesch Reading Ease score; `None` without words or sentences.
pub fn flesch_score(words: usize, sentences: usize, average_syllables: f64) -> Option<f64> {
    if words == 0 || sentences == 0 {
        return None;
    }
    let words_per_sentence = words as f64 / sentences as f64;
    Some(206.835 - 1.015 * words_per_sentence - 84.6 * average_syllables)
}

/// Mean syllable count over the alphanumeric words of `text` (0 if none).
pub fn average_syllables(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let words = text::alnum_words(&lowered);
    if words.is_empty() {
        return 0.0;
    }
    let total: usize = words.iter().map(|w| count_syllables(w)).sum();
    total as f64 / words.len() as f64
}

/// Estimate syllables in a single word.
///
/// Words of three characters or fewer count as one syllable. Longer words
/// count vowel clusters (`a e i o u y`), drop one for a trailing `e`, and
/// never go below one.
pub fn count_syllables(word: &str) -> usize {
    if text::char_len(word) <= 3 {
        return 1;
    }

    let word = word.to_lowercase();
    let mut syllables = 0usize;
    let mut prev_was_vowel = false;
    for ch in word.chars() {
        let is_vowel = VOWELS.contains(&ch);
        if is_vowel && !prev_was_vowel {
            syllables += 1;
        }
        prev_was_vowel = is_vowel;
    }

    if word.ends_with('e') {
        syllables = syllables.saturating_sub(1);
    }
    syllables.max(1)
}
