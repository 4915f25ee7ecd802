#![forbid(unsafe_code)]

//! Editing intents as pure document transforms.
//!
//! Each function takes the current [`Document`] and returns the edited one,
//! or `None` when the intent is a no-op under document policy. A `None`
//! must not reach the edit history: no-ops never create undo steps.
//!
//! # Policy
//!
//! - A document always keeps at least one item.
//! - Items move one position at a time; moving past either end is a no-op.
//! - Imported items always receive fresh ids, whatever the source claims.

use crate::document::{ContentItem, Document, DraftItem, ItemId, ItemPatch};
use crate::style::StylePatch;

/// Direction of a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards the start of the carousel.
    Up,
    /// Towards the end of the carousel.
    Down,
}

/// Append a placeholder item with a fresh id.
#[must_use]
pub fn insert_item(doc: &Document) -> Document {
    insert_item_with(doc, ContentItem::placeholder())
}

/// Append a caller-built item.
#[must_use]
pub fn insert_item_with(doc: &Document, item: ContentItem) -> Document {
    let mut items = doc.items.clone();
    items.push(item);
    doc.with_items(items)
}

/// Remove the item with `id`.
///
/// `None` if the id is unknown or the item is the last one left.
#[must_use]
pub fn remove_item(doc: &Document, id: &ItemId) -> Option<Document> {
    if doc.items.len() <= 1 {
        return None;
    }
    let index = doc.position(id)?;
    let mut items = doc.items.clone();
    items.remove(index);
    Some(doc.with_items(items))
}

/// Swap the item with its neighbour in `direction`.
///
/// `None` if the id is unknown or the item is already at that end.
#[must_use]
pub fn move_item(doc: &Document, id: &ItemId, direction: MoveDirection) -> Option<Document> {
    let index = doc.position(id)?;
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1)?,
        MoveDirection::Down => {
            let next = index + 1;
            if next >= doc.items.len() {
                return None;
            }
            next
        }
    };
    let mut items = doc.items.clone();
    items.swap(index, target);
    Some(doc.with_items(items))
}

/// Replace the whole item list with imported drafts.
///
/// `None` for an empty batch, which would violate the one-item minimum.
#[must_use]
pub fn replace_items(doc: &Document, drafts: Vec<DraftItem>) -> Option<Document> {
    if drafts.is_empty() {
        return None;
    }
    Some(doc.with_items(drafts.into_iter().map(DraftItem::into_item).collect()))
}

/// Append imported drafts after the existing items.
#[must_use]
pub fn append_items(doc: &Document, drafts: Vec<DraftItem>) -> Option<Document> {
    if drafts.is_empty() {
        return None;
    }
    let mut items = doc.items.clone();
    items.extend(drafts.into_iter().map(DraftItem::into_item));
    Some(doc.with_items(items))
}

/// Merge `patch` into the item with `id`.
///
/// `None` if the id is unknown or the patch changes nothing.
#[must_use]
pub fn update_item(doc: &Document, id: &ItemId, patch: &ItemPatch) -> Option<Document> {
    let index = doc.position(id)?;
    let patched = doc.items[index].patched(patch);
    if patched == doc.items[index] {
        return None;
    }
    let mut items = doc.items.clone();
    items[index] = patched;
    Some(doc.with_items(items))
}

/// Merge `patch` into the style. `None` if nothing changes.
#[must_use]
pub fn update_style(doc: &Document, patch: &StylePatch) -> Option<Document> {
    let style = doc.style.patched(patch);
    if style == doc.style {
        return None;
    }
    Some(doc.with_style(style))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_of(ids: &[&str]) -> Document {
        let items = ids
            .iter()
            .map(|id| ContentItem::new(*id, format!("title {id}"), format!("body {id}")))
            .collect();
        Document::new(items, Default::default())
    }

    fn ids(doc: &Document) -> Vec<&str> {
        doc.items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn insert_appends_placeholder() {
        let doc = doc_of(&["a"]);
        let next = insert_item(&doc);
        assert_eq!(next.len(), 2);
        let added = &next.items[1];
        assert_eq!(added.title, crate::document::PLACEHOLDER_TITLE);
        assert_ne!(added.id, doc.items[0].id);
    }

    #[test]
    fn remove_last_item_is_noop() {
        let doc = doc_of(&["a"]);
        assert!(remove_item(&doc, &ItemId::from("a")).is_none());
    }

    #[test]
    fn remove_unknown_item_is_noop() {
        let doc = doc_of(&["a", "b"]);
        assert!(remove_item(&doc, &ItemId::from("zzz")).is_none());
    }

    #[test]
    fn remove_keeps_order() {
        let doc = doc_of(&["a", "b", "c"]);
        let next = remove_item(&doc, &ItemId::from("b")).unwrap();
        assert_eq!(ids(&next), ["a", "c"]);
    }

    #[test]
    fn move_at_boundaries_is_noop() {
        let doc = doc_of(&["a", "b", "c"]);
        assert!(move_item(&doc, &ItemId::from("a"), MoveDirection::Up).is_none());
        assert!(move_item(&doc, &ItemId::from("c"), MoveDirection::Down).is_none());
        assert!(move_item(&doc, &ItemId::from("nope"), MoveDirection::Up).is_none());
    }

    #[test]
    fn move_swaps_with_neighbour() {
        let doc = doc_of(&["a", "b", "c"]);
        let up = move_item(&doc, &ItemId::from("b"), MoveDirection::Up).unwrap();
        assert_eq!(ids(&up), ["b", "a", "c"]);
        let down = move_item(&doc, &ItemId::from("b"), MoveDirection::Down).unwrap();
        assert_eq!(ids(&down), ["a", "c", "b"]);
    }

    #[test]
    fn import_assigns_fresh_ids() {
        let doc = doc_of(&["a"]);
        let drafts = vec![DraftItem::new("x", "1"), DraftItem::new("x", "1")];
        let replaced = replace_items(&doc, drafts.clone()).unwrap();
        assert_eq!(replaced.len(), 2);
        assert_ne!(replaced.items[0].id, replaced.items[1].id);

        let appended = append_items(&doc, drafts).unwrap();
        assert_eq!(appended.len(), 3);
        assert_eq!(appended.items[0].id, ItemId::from("a"));
    }

    #[test]
    fn empty_import_is_noop() {
        let doc = doc_of(&["a"]);
        assert!(replace_items(&doc, Vec::new()).is_none());
        assert!(append_items(&doc, Vec::new()).is_none());
    }

    #[test]
    fn update_without_change_is_noop() {
        let doc = doc_of(&["a"]);
        assert!(update_item(&doc, &ItemId::from("a"), &ItemPatch::title("title a")).is_none());
        let next = update_item(&doc, &ItemId::from("a"), &ItemPatch::title("changed")).unwrap();
        assert_eq!(next.items[0].title, "changed");
    }

    #[test]
    fn style_update_without_change_is_noop() {
        let doc = doc_of(&["a"]);
        let same = StylePatch::new().with_overlay_opacity(doc.style.overlay_opacity);
        assert!(update_style(&doc, &same).is_none());
        let next = update_style(&doc, &StylePatch::new().with_overlay_opacity(80)).unwrap();
        assert_eq!(next.style.overlay_opacity, 80);
        assert_eq!(next.items, doc.items);
    }
}
