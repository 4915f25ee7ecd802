#![forbid(unsafe_code)]

//! Keyboard chords for history navigation.
//!
//! The editor binds two families of chords:
//!
//! | Chord | Action |
//! |-------|--------|
//! | `Ctrl+Z` / `Cmd+Z` | [`HistoryAction::Undo`] |
//! | `Ctrl+Shift+Z` / `Cmd+Shift+Z` | [`HistoryAction::Redo`] |
//! | `Ctrl+Y` / `Cmd+Y` | [`HistoryAction::Redo`] |
//!
//! [`ShortcutMap::map`] only resolves chords to actions. Whether an action
//! may run (something to undo or redo) is decided by the session that owns
//! the history, so a chord fired with nothing to do is a no-op there.
//!
//! # Example
//!
//! ```
//! use carousel_core::shortcut::{HistoryAction, KeyChord, Modifiers, ShortcutMap};
//!
//! let map = ShortcutMap::default();
//! let chord = KeyChord::new('z', Modifiers::CTRL | Modifiers::SHIFT);
//! assert_eq!(map.map(&chord), Some(HistoryAction::Redo));
//! ```

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: char,
    pub modifiers: Modifiers,
}

impl KeyChord {
    #[must_use]
    pub const fn new(key: char, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Whether the platform command modifier is held (Ctrl or Cmd).
    #[must_use]
    pub fn has_command(&self) -> bool {
        self.modifiers.intersects(Modifiers::CTRL | Modifiers::SUPER)
    }
}

/// History navigation requested by a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

/// Resolves chords to history actions.
#[derive(Debug, Clone)]
pub struct ShortcutMap {
    /// Accept `Ctrl+Y` as redo in addition to `Ctrl+Shift+Z`.
    pub redo_on_y: bool,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self { redo_on_y: true }
    }
}

impl ShortcutMap {
    /// Map a chord to an action, or `None` if it is not a history chord.
    ///
    /// Alt-modified chords are never history chords.
    #[must_use]
    pub fn map(&self, chord: &KeyChord) -> Option<HistoryAction> {
        if !chord.has_command() || chord.modifiers.contains(Modifiers::ALT) {
            return None;
        }
        let shift = chord.modifiers.contains(Modifiers::SHIFT);
        match chord.key.to_ascii_lowercase() {
            'z' if shift => Some(HistoryAction::Redo),
            'z' => Some(HistoryAction::Undo),
            'y' if self.redo_on_y => Some(HistoryAction::Redo),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(key: char, modifiers: Modifiers) -> Option<HistoryAction> {
        ShortcutMap::default().map(&KeyChord::new(key, modifiers))
    }

    #[test]
    fn ctrl_z_undoes() {
        assert_eq!(map('z', Modifiers::CTRL), Some(HistoryAction::Undo));
        assert_eq!(map('z', Modifiers::SUPER), Some(HistoryAction::Undo));
    }

    #[test]
    fn shift_variants_redo() {
        assert_eq!(
            map('z', Modifiers::CTRL | Modifiers::SHIFT),
            Some(HistoryAction::Redo)
        );
        // Shift usually reports the uppercase letter.
        assert_eq!(
            map('Z', Modifiers::SUPER | Modifiers::SHIFT),
            Some(HistoryAction::Redo)
        );
        assert_eq!(map('y', Modifiers::CTRL), Some(HistoryAction::Redo));
    }

    #[test]
    fn plain_keys_are_ignored() {
        assert_eq!(map('z', Modifiers::NONE), None);
        assert_eq!(map('z', Modifiers::SHIFT), None);
        assert_eq!(map('x', Modifiers::CTRL), None);
        assert_eq!(map('z', Modifiers::CTRL | Modifiers::ALT), None);
    }

    #[test]
    fn redo_on_y_can_be_disabled() {
        let map = ShortcutMap { redo_on_y: false };
        assert_eq!(map.map(&KeyChord::new('y', Modifiers::CTRL)), None);
    }
}
