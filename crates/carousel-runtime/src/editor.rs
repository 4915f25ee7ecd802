#![forbid(unsafe_code)]

//! The editing session: one open carousel and everything that versions it.
//!
//! [`EditorSession`] is the only way the UI changes a document. Each intent
//! is computed as a pure transform ([`carousel_core::edit`]), then routed
//! through the [`CommitCoalescer`] so it becomes a step, a live update, or
//! nothing at all.
//!
//! # Routing
//!
//! | Intent | Channel |
//! |--------|---------|
//! | add, remove, move, import | structural |
//! | item patch without title/body (e.g. CTA toggle) | structural |
//! | item patch touching title/body | free text (debounced) |
//! | style patch, `commit = false` | continuous (live) |
//! | style patch, `commit = true` | closes the gesture, one step |
//!
//! # Time
//!
//! The session never sleeps or spawns. Operations that may start a timer
//! take `now`; the host calls [`tick`](EditorSession::tick) at or after
//! [`next_deadline`](EditorSession::next_deadline) to fire them.
//!
//! # Teardown
//!
//! [`close`](EditorSession::close) cancels pending timers without flushing.
//! A typing burst still inside its debounce window stays the visible
//! document but never becomes an undo step. Call
//! [`flush_pending`](EditorSession::flush_pending) first to keep it.

use std::sync::Arc;

use carousel_core::edit::{self, MoveDirection};
use carousel_core::presets::{BackgroundPreset, ColorPreset};
use carousel_core::{
    Document, DraftItem, HistoryAction, ItemId, ItemPatch, KeyChord, Language, ShortcutMap,
    StylePatch,
};
use web_time::Instant;

use crate::autosave::{AutosaveOutcome, AutosaveScheduler, Notice, NoticeLevel};
use crate::coalesce::{CoalescerStats, CommitCoalescer, EditChannel};
use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::export::{ExportQuality, ExportReport, SlideRenderer, export_all};
use crate::generate::{ContentGenerator, ImageInput, import_images};
use crate::storage::{DocumentId, DocumentStore, StoredDocument};
use crate::undo::HistoryState;

/// Title of a carousel the user has not named.
pub const UNTITLED: &str = "Untitled Carousel";

/// Where imported drafts go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Drafts become the whole item list.
    #[default]
    Replace,
    /// Drafts are added after the existing items.
    Append,
}

/// What a [`tick`](EditorSession::tick) did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A typing burst became an undo step.
    pub text_committed: bool,
    /// The document was written to the store.
    pub saved: bool,
}

/// An open carousel with undo/redo, coalescing and autosave.
#[derive(Debug)]
pub struct EditorSession {
    history: HistoryState<Document>,
    coalescer: CommitCoalescer,
    autosave: AutosaveScheduler,
    title: String,
    id: Option<DocumentId>,
    language: Language,
    shortcuts: ShortcutMap,
    notices: Vec<Notice>,
    config: EditorConfig,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    // ====================================================================
    // Construction
    // ====================================================================

    /// A new, unsaved carousel with the sample content.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self::with_document(Document::sample(), config)
    }

    /// A new, unsaved carousel starting at `document`.
    #[must_use]
    pub fn with_document(document: Document, config: EditorConfig) -> Self {
        let config = config.validated();
        Self {
            history: HistoryState::with_config(document, config.history()),
            coalescer: CommitCoalescer::new(config.text_debounce()),
            autosave: AutosaveScheduler::new(config.autosave_debounce()),
            title: UNTITLED.to_string(),
            id: None,
            language: Language::default(),
            shortcuts: ShortcutMap::default(),
            notices: Vec::new(),
            config,
        }
    }

    /// Load a stored carousel.
    ///
    /// The loaded document is the starting point, not an undo step.
    pub fn open(store: &dyn DocumentStore, id: DocumentId, config: EditorConfig) -> Result<Self> {
        let Some(stored) = store.load(&id)? else {
            return Err(EditorError::NotFound(id));
        };
        let mut session = Self::with_document(stored.document, config);
        session.title = stored.title;
        session
            .autosave
            .mark_clean(&session.title, session.history.present_arc());
        tracing::debug!(
            target: "carousel.session",
            %id,
            items = session.document().len(),
            "opened"
        );
        session.id = Some(id);
        Ok(session)
    }

    /// Replace the document and drop all history.
    pub fn seed(&mut self, document: Document) {
        self.coalescer.reset();
        self.history.seed(document);
        tracing::debug!(target: "carousel.session", "seeded");
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// The visible document, including uncommitted live edits.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.history.present()
    }

    #[must_use]
    pub fn document_arc(&self) -> &Arc<Document> {
        self.history.present_arc()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryState<Document> {
        &self.history
    }

    /// Whether [`undo`](Self::undo) would change the document.
    ///
    /// Pending live edits count: undo commits them first, then reverts them.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.history.is_live()
    }

    /// Whether [`redo`](Self::redo) would change the document.
    ///
    /// False while edits are pending: redo commits them first, which
    /// discards the redo steps.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo() && !self.history.is_live()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn shortcuts(&self) -> &ShortcutMap {
        &self.shortcuts
    }

    #[must_use]
    pub fn coalescer_stats(&self) -> CoalescerStats {
        self.coalescer.stats()
    }

    /// Whether an autosave is waiting for its quiet period.
    #[must_use]
    pub fn save_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.coalescer.next_deadline(), self.autosave.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take all queued notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ====================================================================
    // Metadata
    // ====================================================================

    /// Rename the carousel. Titles are not versioned but are autosaved.
    pub fn set_title(&mut self, title: impl Into<String>, now: Instant) {
        let title = title.into();
        if title != self.title {
            self.title = title;
            self.autosave.mark_dirty(now);
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Give an unsaved carousel a place in storage.
    pub fn assign_id(&mut self, id: DocumentId, now: Instant) {
        self.id = Some(id);
        self.autosave.mark_dirty(now);
    }

    // ====================================================================
    // History
    // ====================================================================

    /// Step back. Pending typing and gestures are committed first, so this
    /// reverts them before anything older.
    pub fn undo(&mut self, now: Instant) -> bool {
        self.coalescer.flush(&mut self.history);
        if !self.history.undo() {
            return false;
        }
        tracing::debug!(
            target: "carousel.session",
            past_len = self.history.past_len(),
            future_len = self.history.future_len(),
            "undo"
        );
        self.changed(now);
        true
    }

    /// Step forward. Pending edits are committed first, which starts a new
    /// branch, so redo only runs when nothing was pending.
    pub fn redo(&mut self, now: Instant) -> bool {
        self.coalescer.flush(&mut self.history);
        if !self.history.redo() {
            return false;
        }
        tracing::debug!(
            target: "carousel.session",
            past_len = self.history.past_len(),
            future_len = self.history.future_len(),
            "redo"
        );
        self.changed(now);
        true
    }

    /// Run the history action bound to `chord`, if any and if possible.
    ///
    /// Returns the action that ran.
    pub fn handle_shortcut(&mut self, chord: &KeyChord, now: Instant) -> Option<HistoryAction> {
        let action = self.shortcuts.map(chord)?;
        let ran = match action {
            HistoryAction::Undo => self.can_undo() && self.undo(now),
            HistoryAction::Redo => self.can_redo() && self.redo(now),
        };
        ran.then_some(action)
    }

    // ====================================================================
    // Items
    // ====================================================================

    /// Append a placeholder item and return its id.
    pub fn add_item(&mut self, now: Instant) -> ItemId {
        let doc = edit::insert_item(self.document());
        let id = doc
            .items
            .last()
            .map_or_else(ItemId::generate, |item| item.id.clone());
        self.structural(doc, now);
        id
    }

    /// Remove an item. Never removes the last one.
    pub fn remove_item(&mut self, id: &ItemId, now: Instant) -> bool {
        let doc = edit::remove_item(self.document(), id);
        self.apply_structural(doc, now)
    }

    /// Move an item one position.
    pub fn move_item(&mut self, id: &ItemId, direction: MoveDirection, now: Instant) -> bool {
        let doc = edit::move_item(self.document(), id, direction);
        self.apply_structural(doc, now)
    }

    /// Patch one item.
    ///
    /// Title and body changes are typing: they show immediately and become
    /// one undo step once the user pauses.
    pub fn update_item(&mut self, id: &ItemId, patch: &ItemPatch, now: Instant) -> bool {
        let Some(doc) = edit::update_item(self.document(), id, patch) else {
            return false;
        };
        if patch.touches_text() {
            self.coalescer.free_text(&mut self.history, doc, now);
            self.changed(now);
        } else {
            self.structural(doc, now);
        }
        true
    }

    pub fn replace_items(&mut self, drafts: Vec<DraftItem>, now: Instant) -> bool {
        let doc = edit::replace_items(self.document(), drafts);
        self.apply_structural(doc, now)
    }

    pub fn append_items(&mut self, drafts: Vec<DraftItem>, now: Instant) -> bool {
        let doc = edit::append_items(self.document(), drafts);
        self.apply_structural(doc, now)
    }

    /// Generate items from free text and import them as one step.
    ///
    /// A generator error leaves the document and history untouched.
    pub fn import_text<G: ContentGenerator + ?Sized>(
        &mut self,
        generator: &mut G,
        text: &str,
        mode: ImportMode,
        now: Instant,
    ) -> Result<bool> {
        let drafts = generator.slides_from_text(text, self.language)?;
        Ok(self.import(drafts, mode, now))
    }

    /// Extract one item per image and import them as one step.
    pub fn import_images<G: ContentGenerator + ?Sized>(
        &mut self,
        generator: &mut G,
        images: &[ImageInput],
        mode: ImportMode,
        now: Instant,
    ) -> Result<bool> {
        let drafts = import_images(generator, images, self.language)?;
        Ok(self.import(drafts, mode, now))
    }

    fn import(&mut self, drafts: Vec<DraftItem>, mode: ImportMode, now: Instant) -> bool {
        let count = drafts.len();
        let imported = match mode {
            ImportMode::Replace => self.replace_items(drafts, now),
            ImportMode::Append => self.append_items(drafts, now),
        };
        tracing::debug!(target: "carousel.session", count, ?mode, imported, "import");
        imported
    }

    // ====================================================================
    // Style
    // ====================================================================

    /// Patch the style.
    ///
    /// `commit = false` is an intermediate value of a drag and only updates
    /// the view. `commit = true` ends the gesture: everything since the
    /// gesture started becomes one undo step.
    pub fn update_style(&mut self, patch: &StylePatch, commit: bool, now: Instant) -> bool {
        let doc = edit::update_style(self.document(), patch);
        if !commit {
            let Some(doc) = doc else {
                return false;
            };
            self.coalescer.continuous(&mut self.history, doc);
            self.changed(now);
            return true;
        }

        let dragging = self.coalescer.open_channel() == Some(EditChannel::Continuous);
        match doc {
            Some(doc) if dragging => {
                self.coalescer.continuous(&mut self.history, doc);
                self.coalescer.end_gesture(&mut self.history);
                self.changed(now);
                true
            }
            Some(doc) => {
                self.structural(doc, now);
                true
            }
            None => self.coalescer.end_gesture(&mut self.history),
        }
    }

    pub fn apply_color_preset(&mut self, preset: &ColorPreset, now: Instant) -> bool {
        self.update_style(&StylePatch::from_color_preset(preset), true, now)
    }

    pub fn apply_background_preset(&mut self, preset: &BackgroundPreset, now: Instant) -> bool {
        let patch = StylePatch::new().with_background(preset.value, false);
        self.update_style(&patch, true, now)
    }

    // ====================================================================
    // Export
    // ====================================================================

    /// Render every item, naming files after the title.
    pub fn export<R: SlideRenderer + ?Sized>(
        &self,
        renderer: &mut R,
        quality: ExportQuality,
    ) -> Result<ExportReport> {
        let report = export_all(renderer, self.document(), &self.title, quality)?;
        if !report.is_complete() {
            tracing::warn!(
                target: "carousel.session",
                failures = report.failures.len(),
                "export incomplete"
            );
        }
        Ok(report)
    }

    // ====================================================================
    // Lifecycle
    // ====================================================================

    /// Fire due timers: the text commit, then the autosave.
    pub fn tick(&mut self, now: Instant, store: &mut dyn DocumentStore) -> TickReport {
        let text_committed = self.coalescer.poll(&mut self.history, now);
        let outcome = self.autosave.poll(
            now,
            self.id.as_ref(),
            &self.title,
            self.history.present_arc(),
            store,
        );
        let saved = match outcome {
            AutosaveOutcome::Saved => true,
            AutosaveOutcome::Failed(err) => {
                self.notices.push(Notice::new(
                    NoticeLevel::Error,
                    format!("Could not save changes: {err}"),
                ));
                false
            }
            AutosaveOutcome::Pending | AutosaveOutcome::Unsaved | AutosaveOutcome::Unchanged => {
                false
            }
        };
        TickReport {
            text_committed,
            saved,
        }
    }

    /// Commit any pending typing or open gesture now.
    pub fn flush_pending(&mut self) -> bool {
        self.coalescer.flush(&mut self.history)
    }

    /// End the session without flushing.
    ///
    /// Returns the visible document, live edits included, for the caller to
    /// persist if it wants to.
    pub fn close(mut self) -> StoredDocument {
        self.coalescer.cancel();
        let dropped_save = self.autosave.cancel();
        tracing::debug!(
            target: "carousel.session",
            live = self.history.is_live(),
            dropped_save,
            "closed"
        );
        StoredDocument::new(self.title, Document::clone(self.history.present()))
    }

    // ====================================================================
    // Internals
    // ====================================================================

    fn apply_structural(&mut self, doc: Option<Document>, now: Instant) -> bool {
        match doc {
            Some(doc) => {
                self.structural(doc, now);
                true
            }
            None => false,
        }
    }

    fn structural(&mut self, doc: Document, now: Instant) {
        self.coalescer.structural(&mut self.history, doc);
        self.changed(now);
    }

    fn changed(&mut self, now: Instant) {
        self.autosave.mark_dirty(now);
    }
}
