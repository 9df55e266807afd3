//! Editing session state for hosts.
//!
//! A [`Session`] owns everything mutable about an interactive editor: the
//! text buffer, view mode, theme, recent activity, and the autosave
//! scheduler. It calls into the stateless engine through
//! [`Session::snapshot`]; the engine never sees the session.

use std::collections::VecDeque;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::autosave::AutosaveScheduler;
use crate::error::StoreResult;
use crate::metrics::{self, MetricsSnapshot};
use crate::store::TextStore;

/// Number of activity entries kept.
pub const ACTIVITY_LIMIT: usize = 20;

/// How much detail a host shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ViewMode {
    /// Counts and reading times only.
    Basic,
    /// Everything, including keywords and details.
    #[default]
    Advanced,
}

impl ViewMode {
    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Basic => Self::Advanced,
            Self::Advanced => Self::Basic,
        }
    }

    /// Returns the mode as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns the theme as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// One recorded user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    /// What happened.
    pub action: String,
    /// When it happened.
    pub at: DateTime<Utc>,
}

/// Most recent actions, newest first, capped at [`ACTIVITY_LIMIT`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
}

impl ActivityLog {
    /// Record an action at `at`, evicting the oldest beyond the cap.
    pub fn record(&mut self, action: impl Into<String>, at: DateTime<Utc>) {
        self.entries.push_front(Activity {
            action: action.into(),
            at,
        });
        self.entries.truncate(ACTIVITY_LIMIT);
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mutable host state around the metrics engine.
#[derive(Debug, Clone, Default)]
pub struct Session {
    text: String,
    mode: ViewMode,
    theme: Theme,
    activity: ActivityLog,
    autosave: AutosaveScheduler,
}

impl Session {
    /// Create an empty session with the given autosave scheduler.
    pub fn new(autosave: AutosaveScheduler) -> Self {
        Self {
            autosave,
            ..Self::default()
        }
    }

    /// Start in `theme` instead of the default.
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Start in `mode` instead of the default. Not recorded as activity.
    pub const fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current view mode.
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Current theme.
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Recent activity.
    pub const fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Autosave scheduler.
    pub const fn autosave(&self) -> &AutosaveScheduler {
        &self.autosave
    }

    /// Mutable autosave scheduler (enable/disable).
    pub fn autosave_mut(&mut self) -> &mut AutosaveScheduler {
        &mut self.autosave
    }

    /// Run the engine over the current text.
    pub fn snapshot(&self) -> MetricsSnapshot {
        metrics::analyze(&self.text)
    }

    /// Replace the text (typing).
    pub fn set_text(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.edited("Text modified", now);
    }

    /// Type a line at the end of the buffer, in place.
    pub fn type_line(&mut self, line: &str, now: Instant) {
        self.text.reserve(line.len() + 1);
        self.text.push_str(line);
        self.text.push('\n');
        self.edited("Text modified", now);
    }

    /// Append text at the end (pasting).
    pub fn append(&mut self, text: &str, now: Instant) {
        self.text.push_str(text);
        self.edited("Text pasted", now);
    }

    /// Remove all text.
    pub fn clear(&mut self, now: Instant) {
        self.text.clear();
        self.edited("Cleared all text", now);
    }

    /// Switch between basic and advanced mode.
    pub fn toggle_mode(&mut self) -> ViewMode {
        self.mode = self.mode.toggled();
        let label = match self.mode {
            ViewMode::Basic => "Switched to Basic mode",
            ViewMode::Advanced => "Switched to Advanced mode",
        };
        self.activity.record(label, Utc::now());
        self.mode
    }

    /// Switch between light and dark theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.activity
            .record(format!("Switched to {} theme", self.theme.as_str()), Utc::now());
        self.theme
    }

    /// Load previously saved text from `store`, if any.
    ///
    /// An empty draft counts as nothing saved. Restoring is not an edit: it
    /// does not schedule a save.
    #[tracing::instrument(skip_all)]
    pub fn restore(&mut self, store: &impl TextStore) -> StoreResult<bool> {
        let Some(saved) = store.load()?.filter(|saved| !saved.text.is_empty()) else {
            return Ok(false);
        };
        self.text = saved.text;
        let action = match saved.saved_at {
            Some(at) => format!(
                "Loaded saved content from {}",
                at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            None => "Loaded saved content".to_string(),
        };
        self.activity.record(action, Utc::now());
        tracing::info!(bytes = self.text.len(), "session restored");
        Ok(true)
    }

    /// Save to `store` if the autosave deadline has passed at `now`.
    ///
    /// Returns whether a save was attempted. A failed save is recorded on
    /// the scheduler and returned as an error.
    pub fn flush_due(&mut self, store: &impl TextStore, now: Instant) -> StoreResult<bool> {
        if !self.autosave.take_due(now) {
            return Ok(false);
        }
        self.persist(store).map(|()| true)
    }

    /// Save any pending edit to `store` now, ignoring the deadline.
    pub fn flush_pending(&mut self, store: &impl TextStore) -> StoreResult<bool> {
        if !self.autosave.take_pending() {
            return Ok(false);
        }
        self.persist(store).map(|()| true)
    }

    /// Save unconditionally (an explicit save request).
    pub fn save_now(&mut self, store: &impl TextStore) -> StoreResult<()> {
        self.autosave.take_pending();
        self.persist(store)?;
        self.activity.record("Content saved", Utc::now());
        Ok(())
    }

    fn persist(&mut self, store: &impl TextStore) -> StoreResult<()> {
        match store.save(&self.text) {
            Ok(()) => {
                self.autosave.record_saved();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.autosave.record_failed();
                Err(e)
            }
        }
    }

    fn edited(&mut self, action: &str, now: Instant) {
        self.activity.record(action, Utc::now());
        self.autosave.note_edit(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autosave::SaveStatus;
    use crate::error::StoreError;
    use crate::store::SavedText;
    use std::cell::RefCell;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(500);

    /// In-memory store recording every save.
    #[derive(Default)]
    struct MemoryStore {
        saves: RefCell<Vec<String>>,
        fail: bool,
    }

    impl TextStore for MemoryStore {
        fn load(&self) -> StoreResult<Option<SavedText>> {
            Ok(self.saves.borrow().last().map(|t| SavedText {
                text: t.clone(),
                saved_at: None,
            }))
        }

        fn save(&self, text: &str) -> StoreResult<()> {
            if self.fail {
                return Err(StoreError::Write {
                    path: "memory".into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.saves.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn snapshot_reflects_current_text() {
        let now = Instant::now();
        let mut session = Session::default();
        assert!(session.snapshot().is_empty());

        session.set_text("Hello world. This is a test!", now);
        assert_eq!(session.snapshot().word_count, 6);

        session.append(" More words here.", now);
        assert_eq!(session.snapshot().sentence_count, 3);

        session.clear(now);
        assert!(session.snapshot().is_empty());
    }

    #[test]
    fn burst_of_edits_saves_once() {
        let start = Instant::now();
        let store = MemoryStore::default();
        let mut session = Session::new(AutosaveScheduler::new(DELAY));

        for (i, text) in ["H", "He", "Hel", "Hell", "Hello"].into_iter().enumerate() {
            let at = start + Duration::from_millis(100 * i as u64);
            session.set_text(text, at);
            assert!(!session.flush_due(&store, at).unwrap());
        }

        let done = start + Duration::from_millis(400) + DELAY;
        assert!(session.flush_due(&store, done).unwrap());
        assert!(!session.flush_due(&store, done + DELAY).unwrap());
        assert_eq!(*store.saves.borrow(), vec!["Hello".to_string()]);
        assert_eq!(session.autosave().status(), SaveStatus::Saved);
    }

    #[test]
    fn failed_save_is_reported() {
        let start = Instant::now();
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };
        let mut session = Session::new(AutosaveScheduler::new(DELAY));
        session.set_text("text", start);

        assert!(session.flush_due(&store, start + DELAY).is_err());
        assert_eq!(session.autosave().status(), SaveStatus::Failed);
    }

    #[test]
    fn disabled_autosave_never_saves() {
        let start = Instant::now();
        let store = MemoryStore::default();
        let mut session = Session::new(AutosaveScheduler::disabled(DELAY));
        session.set_text("text", start);

        assert!(!session.flush_due(&store, start + DELAY * 10).unwrap());
        assert!(!session.flush_pending(&store).unwrap());
        assert!(store.saves.borrow().is_empty());
    }

    #[test]
    fn explicit_save_ignores_scheduler() {
        let store = MemoryStore::default();
        let mut session = Session::new(AutosaveScheduler::disabled(DELAY));
        session.set_text("keep me", Instant::now());
        session.save_now(&store).unwrap();
        assert_eq!(*store.saves.borrow(), vec!["keep me".to_string()]);
    }

    #[test]
    fn restore_loads_text_without_scheduling() {
        let store = MemoryStore::default();
        store.save("restored text").unwrap();

        let mut session = Session::new(AutosaveScheduler::new(DELAY));
        assert!(session.restore(&store).unwrap());
        assert_eq!(session.text(), "restored text");
        assert!(session.autosave().deadline().is_none());
        assert_eq!(
            session.activity().iter().next().unwrap().action,
            "Loaded saved content"
        );
    }

    #[test]
    fn restore_from_empty_store() {
        let store = MemoryStore::default();
        let mut session = Session::default();
        assert!(!session.restore(&store).unwrap());
        assert!(session.activity().is_empty());
    }

    #[test]
    fn empty_draft_is_not_restored() {
        let store = MemoryStore::default();
        store.save("").unwrap();

        let mut session = Session::default();
        assert!(!session.restore(&store).unwrap());
        assert_eq!(session.text(), "");
        assert!(session.activity().is_empty());
    }

    #[test]
    fn typed_lines_grow_the_buffer() {
        let start = Instant::now();
        let mut session = Session::new(AutosaveScheduler::new(DELAY));
        session.type_line("First line.", start);
        session.type_line("Second line.", start);

        assert_eq!(session.text(), "First line.\nSecond line.\n");
        assert_eq!(session.activity().len(), 2);
        assert_eq!(
            session.activity().iter().next().unwrap().action,
            "Text modified"
        );
        assert_eq!(session.autosave().deadline(), Some(start + DELAY));
    }

    #[test]
    fn initial_mode_is_not_activity() {
        let session = Session::default().with_mode(ViewMode::Basic);
        assert_eq!(session.mode(), ViewMode::Basic);
        assert!(session.activity().is_empty());
    }

    #[test]
    fn activity_keeps_twenty_newest_first() {
        let now = Instant::now();
        let mut session = Session::default();
        for i in 0..25 {
            session.set_text(format!("text {i}"), now);
        }
        session.toggle_theme();

        let log = session.activity();
        assert_eq!(log.len(), ACTIVITY_LIMIT);
        assert_eq!(log.iter().next().unwrap().action, "Switched to dark theme");
    }

    #[test]
    fn mode_and_theme_toggle() {
        let mut session = Session::default().with_theme(Theme::Dark);
        assert_eq!(session.mode(), ViewMode::Advanced);
        assert_eq!(session.toggle_mode(), ViewMode::Basic);
        assert_eq!(session.toggle_mode(), ViewMode::Advanced);
        assert_eq!(session.toggle_theme(), Theme::Light);
        assert_eq!(
            session
                .activity()
                .iter()
                .map(|a| a.action.as_str())
                .collect::<Vec<_>>(),
            vec![
                "Switched to light theme",
                "Switched to Advanced mode",
                "Switched to Basic mode",
            ]
        );
    }
}
