#![forbid(unsafe_code)]

//! The versioned value edited by a session.
//!
//! A [`Document`] is an ordered list of [`ContentItem`]s (one per slide) plus
//! a document-wide [`StyleConfig`]. Everything here is a plain value: equality
//! is structural, updates produce new values, and nothing can fail.
//!
//! # Wire format
//!
//! Documents serialize to the shape the storage layer persists:
//!
//! ```json
//! { "slides": [{ "id": "1", "title": "..", "body": "..", "isCta": false }],
//!   "settings": { "aspectRatio": "portrait", ... } }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::style::StyleConfig;

/// Title given to items created from scratch.
pub const PLACEHOLDER_TITLE: &str = "New Point";

/// Body given to items created from scratch.
pub const PLACEHOLDER_BODY: &str = "Add your content here...";

/// Stable identifier of a content item.
///
/// Opaque to everything except equality. Assigned once when the item is
/// created and never reused or rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an existing identifier (e.g. one read back from storage).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One slide of the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ItemId,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub is_cta: bool,
}

impl ContentItem {
    /// Create an item with an explicit id.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            is_cta: false,
        }
    }

    /// A fresh item with a generated id and placeholder text.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(ItemId::generate(), PLACEHOLDER_TITLE, PLACEHOLDER_BODY)
    }

    /// Mark the item as a call-to-action slide.
    #[must_use]
    pub fn with_cta(mut self, is_cta: bool) -> Self {
        self.is_cta = is_cta;
        self
    }

    /// Apply a partial update, returning the merged item.
    #[must_use]
    pub fn patched(&self, patch: &ItemPatch) -> Self {
        Self {
            id: self.id.clone(),
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            body: patch.body.clone().unwrap_or_else(|| self.body.clone()),
            is_cta: patch.is_cta.unwrap_or(self.is_cta),
        }
    }
}

/// Partial update of a [`ContentItem`]. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_cta: Option<bool>,
}

impl ItemPatch {
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn cta(is_cta: bool) -> Self {
        Self {
            is_cta: Some(is_cta),
            ..Self::default()
        }
    }

    /// Whether the patch edits free text (title or body).
    ///
    /// Text edits are coalesced by the session; everything else commits
    /// immediately.
    #[must_use]
    pub fn touches_text(&self) -> bool {
        self.title.is_some() || self.body.is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.is_cta.is_none()
    }
}

/// Title and body produced by a content generator, not yet part of a
/// document. Drafts carry no id; one is assigned on import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub is_cta: bool,
}

impl DraftItem {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            is_cta: false,
        }
    }

    /// Turn the draft into an item with a freshly generated id.
    #[must_use]
    pub fn into_item(self) -> ContentItem {
        ContentItem {
            id: ItemId::generate(),
            title: self.title,
            body: self.body,
            is_cta: self.is_cta,
        }
    }
}

/// The aggregate versioned by the edit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "slides")]
    pub items: Vec<ContentItem>,
    #[serde(rename = "settings")]
    pub style: StyleConfig,
}

impl Document {
    #[must_use]
    pub fn new(items: Vec<ContentItem>, style: StyleConfig) -> Self {
        Self { items, style }
    }

    /// The sample content a brand-new carousel starts with.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            items: vec![
                ContentItem::new(
                    "1",
                    "Stop Wasting Time on *Design*",
                    "Here is how you can create *stunning* carousels in less than 5 minutes \
                     without opening Photoshop.",
                ),
                ContentItem::new(
                    "2",
                    "The \"Hook\" Strategy",
                    "Your first slide must *stop the scroll*. Use bold typography and a \
                     controversial statement.",
                ),
                ContentItem::new(
                    "3",
                    "Save This Post",
                    "Found this helpful? *Bookmark it* for later so you don't lose these tips.",
                )
                .with_cta(true),
            ],
            style: StyleConfig::default(),
        }
    }

    /// Replace the item list wholesale.
    #[must_use]
    pub fn with_items(&self, items: Vec<ContentItem>) -> Self {
        Self {
            items,
            style: self.style.clone(),
        }
    }

    /// Replace the style wholesale.
    #[must_use]
    pub fn with_style(&self, style: StyleConfig) -> Self {
        Self {
            items: self.items.clone(),
            style,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&ContentItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::sample()
    }
}
