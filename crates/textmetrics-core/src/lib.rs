//! Core library for textmetrics.
//!
//! Derives word, sentence, and paragraph counts, reading metrics, and
//! keyword frequency from free-form text. The engine is a set of pure
//! functions; [`analyze`] runs all of them and returns a [`MetricsSnapshot`].
//!
//! # Modules
//!
//! - [`text`] - Tokenizer: words, sentences, paragraphs, alphanumeric words
//! - [`counts`] - Word, character, sentence, and paragraph counts
//! - [`readability`] - Syllables, Flesch score, reading level, reading time
//! - [`keywords`] - Stop-word-filtered keyword frequency and density
//! - [`details`] - Average word length, longest word, average sentence length
//! - [`metrics`] - The [`analyze`] entry point and [`MetricsSnapshot`]
//! - [`session`] - Host-side editing state (mode, theme, activity, autosave)
//! - [`autosave`] - Coalescing autosave scheduler
//! - [`store`] - Draft storage
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use textmetrics_core::{ReadingLevel, analyze};
//!
//! let snapshot = analyze("Hello world. This is a test!");
//! assert_eq!(snapshot.word_count, 6);
//! assert_eq!(snapshot.sentence_count, 2);
//! assert_eq!(snapshot.reading_level, ReadingLevel::Elementary);
//! ```
#![deny(unsafe_code)]

pub mod autosave;
pub mod config;
pub mod counts;
pub mod details;
pub mod error;
pub mod keywords;
pub mod metrics;
pub mod readability;
pub mod session;
pub mod store;
pub mod text;
pub mod word_lists;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, StoreError, StoreResult};
pub use keywords::{Keyword, KeywordDensity, KeywordReport};
pub use metrics::{MetricsSnapshot, analyze};
pub use readability::{ReadabilityReport, ReadingLevel};
pub use session::{Session, Theme, ViewMode};
pub use store::{FileStore, TextStore};
