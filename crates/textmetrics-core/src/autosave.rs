//! Autosave scheduling.
//!
//! Edits arriving faster than the configured delay are coalesced into a
//! single save that becomes due one delay after the last edit. The
//! scheduler never reads a clock itself; hosts pass `now` in, which keeps it
//! deterministic and independent of any timer or event system.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Default delay between the last edit and the save.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Where the scheduler stands, for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// Nothing has been edited since start or the last save.
    Idle,
    /// An edit is waiting for its save.
    Pending,
    /// The last due save succeeded.
    Saved,
    /// The last due save failed.
    Failed,
    /// Autosave is switched off.
    Disabled,
}

impl SaveStatus {
    /// Short label for a status line.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Pending => "Saving...",
            Self::Saved => "Auto-saved",
            Self::Failed => "Save failed",
            Self::Disabled => "Auto-save disabled",
        }
    }
}

/// Debounced save scheduler.
#[derive(Debug, Clone)]
pub struct AutosaveScheduler {
    delay: Duration,
    enabled: bool,
    deadline: Option<Instant>,
    status: SaveStatus,
}

impl Default for AutosaveScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl AutosaveScheduler {
    /// Create an enabled scheduler with the given delay.
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            enabled: true,
            deadline: None,
            status: SaveStatus::Idle,
        }
    }

    /// Create a scheduler that ignores edits.
    pub const fn disabled(delay: Duration) -> Self {
        Self {
            delay,
            enabled: false,
            deadline: None,
            status: SaveStatus::Disabled,
        }
    }

    /// Delay between the last edit and the save.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether edits schedule saves.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current status.
    pub const fn status(&self) -> SaveStatus {
        self.status
    }

    /// When the pending save becomes due, if any.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record an edit at `now`, pushing any pending save back to
    /// `now + delay`.
    pub fn note_edit(&mut self, now: Instant) {
        if !self.enabled {
            return;
        }
        self.deadline = Some(now + self.delay);
        self.status = SaveStatus::Pending;
    }

    /// Whether a pending save is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Claim the pending save if it is due at `now`.
    ///
    /// Returns `true` at most once per coalesced burst of edits; the caller
    /// must then report the outcome with [`record_saved`](Self::record_saved)
    /// or [`record_failed`](Self::record_failed).
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Claim the pending save regardless of its deadline (e.g. on shutdown).
    pub fn take_pending(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Record a successful save.
    pub fn record_saved(&mut self) {
        self.status = SaveStatus::Saved;
    }

    /// Record a failed save.
    pub fn record_failed(&mut self) {
        self.status = SaveStatus::Failed;
    }

    /// Turn autosave on.
    pub fn enable(&mut self) {
        self.enabled = true;
        if self.status == SaveStatus::Disabled {
            self.status = SaveStatus::Idle;
        }
    }

    /// Turn autosave off, cancelling any pending save.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.deadline = None;
        self.status = SaveStatus::Disabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1000);

    #[test]
    fn single_edit_is_due_after_delay() {
        let start = Instant::now();
        let mut sched = AutosaveScheduler::new(DELAY);
        sched.note_edit(start);

        assert_eq!(sched.status(), SaveStatus::Pending);
        assert!(!sched.take_due(start + Duration::from_millis(999)));
        assert!(sched.take_due(start + DELAY));
        // Claimed once only.
        assert!(!sched.take_due(start + DELAY * 2));
    }

    #[test]
    fn rapid_edits_coalesce_into_one_save() {
        let start = Instant::now();
        let mut sched = AutosaveScheduler::new(DELAY);
        for i in 0..5 {
            sched.note_edit(start + Duration::from_millis(i * 300));
        }
        let last = start + Duration::from_millis(1200);

        // Due relative to the last edit, not the first.
        assert!(!sched.is_due(start + DELAY));
        assert_eq!(sched.deadline(), Some(last + DELAY));

        let mut saves = 0;
        for ms in (0..4000).step_by(100) {
            if sched.take_due(start + Duration::from_millis(ms)) {
                saves += 1;
            }
        }
        assert_eq!(saves, 1);
    }

    #[test]
    fn outcome_updates_status() {
        let start = Instant::now();
        let mut sched = AutosaveScheduler::new(DELAY);
        sched.note_edit(start);
        assert!(sched.take_due(start + DELAY));
        sched.record_saved();
        assert_eq!(sched.status(), SaveStatus::Saved);

        sched.note_edit(start + DELAY);
        assert!(sched.take_due(start + DELAY * 2));
        sched.record_failed();
        assert_eq!(sched.status().label(), "Save failed");
    }

    #[test]
    fn disable_cancels_pending_save() {
        let start = Instant::now();
        let mut sched = AutosaveScheduler::new(DELAY);
        sched.note_edit(start);
        sched.disable();

        assert!(!sched.take_due(start + DELAY * 10));
        assert_eq!(sched.status(), SaveStatus::Disabled);

        sched.note_edit(start);
        assert!(sched.deadline().is_none());
    }

    #[test]
    fn enable_resumes_scheduling() {
        let start = Instant::now();
        let mut sched = AutosaveScheduler::disabled(DELAY);
        sched.enable();
        assert_eq!(sched.status(), SaveStatus::Idle);
        sched.note_edit(start);
        assert!(sched.is_due(start + DELAY));
    }

    #[test]
    fn take_pending_ignores_deadline() {
        let start = Instant::now();
        let mut sched = AutosaveScheduler::new(DELAY);
        assert!(!sched.take_pending());
        sched.note_edit(start);
        assert!(sched.take_pending());
        assert!(sched.deadline().is_none());
    }
}
