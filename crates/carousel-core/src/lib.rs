#![forbid(unsafe_code)]

//! Core: the carousel document model and editing intents.
//!
//! # Role in the editor
//! `carousel-core` holds the values a session edits and nothing that depends
//! on time or I/O. The runtime (`carousel-runtime`) versions these values in
//! its edit history and decides when an edit becomes an undo step.
//!
//! # Primary responsibilities
//! - **Document**: slides ([`ContentItem`]) plus a [`StyleConfig`].
//! - **Patches**: [`ItemPatch`] and [`StylePatch`] partial updates.
//! - **Edit**: pure transforms enforcing document policy (never fewer than
//!   one slide, bounded reorders, fresh ids on import).
//! - **Shortcuts**: chord to undo/redo mapping.

pub mod document;
pub mod edit;
pub mod language;
pub mod presets;
pub mod shortcut;
pub mod style;

pub use document::{ContentItem, Document, DraftItem, ItemId, ItemPatch};
pub use edit::MoveDirection;
pub use language::Language;
pub use shortcut::{HistoryAction, KeyChord, Modifiers, ShortcutMap};
pub use style::{AspectRatio, FontTheme, StyleConfig, StylePatch, SwipeStyle};
