#![forbid(unsafe_code)]

//! Carousel Runtime
//!
//! This crate versions the documents defined in `carousel-core` and decides
//! when an edit becomes an undo step.
//!
//! # Key Components
//!
//! - [`HistoryState`] - Snapshot history with live updates and branch discard
//! - [`CommitCoalescer`] - Turns keystrokes and drags into discrete steps
//! - [`Debouncer`] - Cancel-and-restart timer driven by an explicit clock
//! - [`EditorSession`] - One open carousel: editing intents, undo/redo, autosave
//! - [`DocumentStore`] - Persistence seam, with [`MemoryStore`] and [`FileStore`]
//! - [`ContentGenerator`] - Generation seam and tolerant reply decoding
//! - [`SlideRenderer`] - Export seam
//!
//! # Role in the editor
//! The UI calls intent methods on an [`EditorSession`] and renders
//! [`EditorSession::document`]. The host loop calls
//! [`EditorSession::tick`] when [`EditorSession::next_deadline`] passes.
//! Nothing here spawns threads or sleeps.

pub mod autosave;
pub mod coalesce;
pub mod config;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod export;
pub mod generate;
pub mod logging;
pub mod storage;
pub mod undo;

pub use autosave::{AutosaveOutcome, AutosaveScheduler, Notice, NoticeLevel};
pub use coalesce::{CoalescerStats, CommitCoalescer, EditChannel};
pub use config::{ConfigError, EditorConfig};
pub use debounce::Debouncer;
pub use editor::{EditorSession, ImportMode, TickReport, UNTITLED};
pub use error::{EditorError, Result};
pub use export::{ExportError, ExportQuality, ExportReport, SlideRenderer};
pub use generate::{ContentGenerator, GenerateError, ImageInput};
pub use storage::{
    DocumentId, DocumentStore, FileStore, MemoryStore, StorageError, StorageResult, StoredDocument,
};
pub use undo::{HistoryConfig, HistoryState};
