#![forbid(unsafe_code)]

//! Editor timing and history configuration.
//!
//! [`EditorConfig`] gathers every tunable of an editing session. It can be
//! loaded from TOML or JSON, or overridden from the environment.
//!
//! # Loading
//!
//! ```toml
//! # carousel.toml
//! text_debounce_ms = 600
//! autosave_debounce_ms = 2000
//! history_max_depth = 200
//! ```
//!
//! ```rust,ignore
//! let config = EditorConfig::from_toml_file("carousel.toml")?.validated();
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `CAROUSEL_TEXT_DEBOUNCE_MS` | u64 | 600 | Quiet period before typing becomes a step |
//! | `CAROUSEL_AUTOSAVE_DEBOUNCE_MS` | u64 | 2000 | Quiet period before autosave |
//! | `CAROUSEL_HISTORY_MAX_DEPTH` | usize | unlimited | Undo steps kept |

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use crate::undo::HistoryConfig;

pub const DEFAULT_TEXT_DEBOUNCE_MS: u64 = 600;
pub const MIN_TEXT_DEBOUNCE_MS: u64 = 50;
pub const MAX_TEXT_DEBOUNCE_MS: u64 = 5_000;

pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 2_000;
pub const MIN_AUTOSAVE_DEBOUNCE_MS: u64 = 250;
pub const MAX_AUTOSAVE_DEBOUNCE_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables of an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Quiet period after the last keystroke before a text burst is committed.
    pub text_debounce_ms: u64,
    /// Quiet period after the last change before the document is saved.
    pub autosave_debounce_ms: u64,
    /// Undo steps kept; `None` keeps all of them.
    pub history_max_depth: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            text_debounce_ms: DEFAULT_TEXT_DEBOUNCE_MS,
            autosave_debounce_ms: DEFAULT_AUTOSAVE_DEBOUNCE_MS,
            history_max_depth: None,
        }
    }
}

impl EditorConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Defaults overridden by `CAROUSEL_*` environment variables.
    ///
    /// Unparsable values are ignored; the result is clamped.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(ms) = lookup("CAROUSEL_TEXT_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            self.text_debounce_ms = ms;
        }
        if let Some(ms) = lookup("CAROUSEL_AUTOSAVE_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            self.autosave_debounce_ms = ms;
        }
        if let Some(depth) = lookup("CAROUSEL_HISTORY_MAX_DEPTH").and_then(|v| v.parse().ok()) {
            self.history_max_depth = Some(depth);
        }
        self.validated()
    }

    #[must_use]
    pub fn with_text_debounce(mut self, delay: Duration) -> Self {
        self.text_debounce_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_autosave_debounce(mut self, delay: Duration) -> Self {
        self.autosave_debounce_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_history_max_depth(mut self, depth: usize) -> Self {
        self.history_max_depth = Some(depth);
        self
    }

    /// Clamp every value into its supported range.
    ///
    /// - `text_debounce_ms` to 50-5000
    /// - `autosave_debounce_ms` to 250-60000
    /// - `history_max_depth` to at least 1
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.text_debounce_ms = self
            .text_debounce_ms
            .clamp(MIN_TEXT_DEBOUNCE_MS, MAX_TEXT_DEBOUNCE_MS);
        self.autosave_debounce_ms = self
            .autosave_debounce_ms
            .clamp(MIN_AUTOSAVE_DEBOUNCE_MS, MAX_AUTOSAVE_DEBOUNCE_MS);
        self.history_max_depth = self.history_max_depth.map(|d| d.max(1));
        self
    }

    /// List out-of-range values. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(MIN_TEXT_DEBOUNCE_MS..=MAX_TEXT_DEBOUNCE_MS).contains(&self.text_debounce_ms) {
            errors.push(format!(
                "text_debounce_ms must be in {MIN_TEXT_DEBOUNCE_MS}..={MAX_TEXT_DEBOUNCE_MS}, got {}",
                self.text_debounce_ms
            ));
        }
        if !(MIN_AUTOSAVE_DEBOUNCE_MS..=MAX_AUTOSAVE_DEBOUNCE_MS)
            .contains(&self.autosave_debounce_ms)
        {
            errors.push(format!(
                "autosave_debounce_ms must be in {MIN_AUTOSAVE_DEBOUNCE_MS}..={MAX_AUTOSAVE_DEBOUNCE_MS}, got {}",
                self.autosave_debounce_ms
            ));
        }
        if self.history_max_depth == Some(0) {
            errors.push("history_max_depth must be > 0".into());
        }
        errors
    }

    #[must_use]
    pub fn text_debounce(&self) -> Duration {
        Duration::from_millis(self.text_debounce_ms)
    }

    #[must_use]
    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    #[must_use]
    pub fn history(&self) -> HistoryConfig {
        self.history_max_depth
            .map_or_else(HistoryConfig::unlimited, HistoryConfig::new)
    }
}
