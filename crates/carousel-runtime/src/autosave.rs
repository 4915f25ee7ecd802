#![forbid(unsafe_code)]

//! Debounced background saving.
//!
//! Every change to the document or its title re-arms a quiet-period timer
//! ([`mark_dirty`](AutosaveScheduler::mark_dirty)). When the host loop polls
//! past the deadline, the scheduler saves once, and only if the session has
//! somewhere to save to and the content differs from the last successful
//! save.
//!
//! # Failure Model
//!
//! A failed save never touches the edit history. It is reported as a
//! [`Notice`] for the UI and leaves the scheduler dirty, so the next change
//! retries.

use std::sync::Arc;

use carousel_core::Document;
use web_time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::storage::{DocumentId, DocumentStore, StorageError, StoredDocument};

/// Default quiet period before an autosave.
pub const DEFAULT_AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing message from background work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Result of one [`poll`](AutosaveScheduler::poll).
#[derive(Debug)]
pub enum AutosaveOutcome {
    /// The timer is idle or not yet due.
    Pending,
    /// The timer fired but the session has no document id.
    Unsaved,
    /// The timer fired but nothing changed since the last save.
    Unchanged,
    Saved,
    Failed(StorageError),
}

/// What the last successful save wrote.
#[derive(Debug, Clone)]
struct Baseline {
    title: String,
    document: Arc<Document>,
}

impl Baseline {
    fn matches(&self, title: &str, document: &Arc<Document>) -> bool {
        self.title == title
            && (Arc::ptr_eq(&self.document, document) || *self.document == **document)
    }
}

/// Debounced saver for one session.
#[derive(Debug, Clone)]
pub struct AutosaveScheduler {
    timer: Debouncer,
    baseline: Option<Baseline>,
    saves: u64,
    failures: u64,
}

impl Default for AutosaveScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_DEBOUNCE)
    }
}

impl AutosaveScheduler {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            timer: Debouncer::new(delay),
            baseline: None,
            saves: 0,
            failures: 0,
        }
    }

    /// Record content known to be persisted (e.g. just loaded).
    pub fn mark_clean(&mut self, title: &str, document: &Arc<Document>) {
        self.baseline = Some(Baseline {
            title: title.to_string(),
            document: Arc::clone(document),
        });
    }

    /// Restart the quiet period after a change.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.timer.arm(now);
    }

    /// Save if the quiet period has elapsed.
    pub fn poll(
        &mut self,
        now: Instant,
        id: Option<&DocumentId>,
        title: &str,
        document: &Arc<Document>,
        store: &mut dyn DocumentStore,
    ) -> AutosaveOutcome {
        if !self.timer.poll(now) {
            return AutosaveOutcome::Pending;
        }
        let Some(id) = id else {
            tracing::trace!(target: "carousel.autosave", "skipped: no document id");
            return AutosaveOutcome::Unsaved;
        };
        if self
            .baseline
            .as_ref()
            .is_some_and(|b| b.matches(title, document))
        {
            tracing::trace!(target: "carousel.autosave", %id, "skipped: unchanged");
            return AutosaveOutcome::Unchanged;
        }

        let stored = StoredDocument::new(title, Document::clone(document));
        match store.save(id, &stored) {
            Ok(()) => {
                self.saves += 1;
                self.mark_clean(title, document);
                tracing::debug!(
                    target: "carousel.autosave",
                    %id,
                    items = document.len(),
                    "saved"
                );
                AutosaveOutcome::Saved
            }
            Err(err) => {
                self.failures += 1;
                tracing::warn!(target: "carousel.autosave", %id, error = %err, "save failed");
                AutosaveOutcome::Failed(err)
            }
        }
    }

    /// Drop a pending save.
    pub fn cancel(&mut self) -> bool {
        self.timer.cancel()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.saves
    }

    #[must_use]
    pub fn failure_count(&self) -> u64 {
        self.failures
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.timer.set_delay(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageResult};

    struct BrokenStore;

    impl DocumentStore for BrokenStore {
        fn load(&self, _id: &DocumentId) -> StorageResult<Option<StoredDocument>> {
            Ok(None)
        }

        fn save(&mut self, _id: &DocumentId, _doc: &StoredDocument) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    fn id() -> DocumentId {
        DocumentId::new("doc").unwrap()
    }

    #[test]
    fn saves_once_after_quiet_period() {
        let mut saver = AutosaveScheduler::default();
        let mut store = MemoryStore::new();
        let doc = Arc::new(Document::sample());
        let t0 = Instant::now();

        saver.mark_dirty(t0);
        saver.mark_dirty(t0 + Duration::from_millis(1500));
        assert!(matches!(
            saver.poll(t0 + DEFAULT_AUTOSAVE_DEBOUNCE, Some(&id()), "t", &doc, &mut store),
            AutosaveOutcome::Pending
        ));
        let due = t0 + Duration::from_millis(1500) + DEFAULT_AUTOSAVE_DEBOUNCE;
        assert!(matches!(
            saver.poll(due, Some(&id()), "t", &doc, &mut store),
            AutosaveOutcome::Saved
        ));
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.get(&id()).unwrap().title, "t");
        assert!(!saver.is_pending());
    }

    #[test]
    fn no_id_means_no_save() {
        let mut saver = AutosaveScheduler::default();
        let mut store = MemoryStore::new();
        let doc = Arc::new(Document::sample());
        let t0 = Instant::now();
        saver.mark_dirty(t0);
        assert!(matches!(
            saver.poll(t0 + DEFAULT_AUTOSAVE_DEBOUNCE, None, "t", &doc, &mut store),
            AutosaveOutcome::Unsaved
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn unchanged_content_is_not_rewritten() {
        let mut saver = AutosaveScheduler::default();
        let mut store = MemoryStore::new();
        let doc = Arc::new(Document::sample());
        let t0 = Instant::now();
        saver.mark_clean("t", &doc);

        saver.mark_dirty(t0);
        let copy = Arc::new(Document::sample());
        assert!(matches!(
            saver.poll(t0 + DEFAULT_AUTOSAVE_DEBOUNCE, Some(&id()), "t", &copy, &mut store),
            AutosaveOutcome::Unchanged
        ));

        saver.mark_dirty(t0);
        assert!(matches!(
            saver.poll(t0 + DEFAULT_AUTOSAVE_DEBOUNCE, Some(&id()), "renamed", &copy, &mut store),
            AutosaveOutcome::Saved
        ));
    }

    #[test]
    fn failure_keeps_content_dirty() {
        let mut saver = AutosaveScheduler::default();
        let doc = Arc::new(Document::sample());
        let t0 = Instant::now();

        saver.mark_dirty(t0);
        let due = t0 + DEFAULT_AUTOSAVE_DEBOUNCE;
        let outcome = saver.poll(due, Some(&id()), "t", &doc, &mut BrokenStore);
        assert!(matches!(outcome, AutosaveOutcome::Failed(StorageError::Io(_))));
        assert_eq!(saver.failure_count(), 1);

        let mut store = MemoryStore::new();
        saver.mark_dirty(t0);
        assert!(matches!(
            saver.poll(t0 + DEFAULT_AUTOSAVE_DEBOUNCE, Some(&id()), "t", &doc, &mut store),
            AutosaveOutcome::Saved
        ));
        assert_eq!(saver.save_count(), 1);
    }
}
