//! Error types for textmetrics-core.
//!
//! The metrics engine itself is infallible; errors only arise at the edges
//! hosts own: configuration loading and draft storage.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur when loading or saving draft text.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The draft file exists but could not be read.
    #[error("failed to read draft {path}")]
    Read {
        /// Path of the draft file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The draft file could not be written.
    #[error("failed to write draft {path}")]
    Write {
        /// Path of the draft file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;
