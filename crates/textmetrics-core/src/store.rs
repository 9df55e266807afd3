//! Draft storage.
//!
//! Stores the raw text verbatim. The save time is the file's modification
//! time, so there is no sidecar metadata to keep in sync.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};

use crate::error::{StoreError, StoreResult};

/// Text restored from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedText {
    /// The stored text.
    pub text: String,
    /// When it was last saved, if the backend knows.
    pub saved_at: Option<DateTime<Utc>>,
}

/// Durable storage for the text being edited.
pub trait TextStore {
    /// Load the last saved text, or `None` if nothing was saved yet.
    fn load(&self) -> StoreResult<Option<SavedText>>;

    /// Replace the stored text.
    fn save(&self, text: &str) -> StoreResult<()>;
}

/// A [`TextStore`] backed by a single plain-text file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Utf8PathBuf,
}

impl FileStore {
    /// Store drafts at `path`.
    pub fn new<P: AsRef<Utf8Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the draft file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl TextStore for FileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path))]
    fn load(&self) -> StoreResult<Option<SavedText>> {
        let text = match std::fs::read_to_string(self.path.as_std_path()) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no saved draft");
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let saved_at = std::fs::metadata(self.path.as_std_path())
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);

        tracing::debug!(bytes = text.len(), "draft loaded");
        Ok(Some(SavedText { text, saved_at }))
    }

    #[tracing::instrument(skip(self, text), fields(path = %self.path, bytes = text.len()))]
    fn save(&self, text: &str) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_str().is_empty()
        {
            std::fs::create_dir_all(parent.as_std_path()).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        std::fs::write(self.path.as_std_path(), text).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("draft saved");
        Ok(())
    }
}
