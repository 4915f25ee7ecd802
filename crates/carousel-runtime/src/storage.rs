#![forbid(unsafe_code)]

//! Document persistence seam.
//!
//! The session never talks to a database directly. It loads and saves whole
//! documents through [`DocumentStore`], keyed by [`DocumentId`].
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: a `HashMap`, for tests and ephemeral sessions.
//! - [`FileStore`]: one JSON file per document in a directory.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "title": "Morning routine",
//!   "content": { "slides": [ ... ], "settings": { ... } }
//! }
//! ```
//!
//! # Atomic Writes
//!
//! [`FileStore`] writes to a temp file and renames it over the target, so a
//! crash mid-save leaves the previous version intact.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use carousel_core::Document;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current file format version.
const FORMAT_VERSION: u64 = 1;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid document id {0:?}: expected [A-Za-z0-9_-]+")]
    InvalidId(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("malformed stored document: {0}")]
    Format(#[from] serde_json::Error),
    #[error(
        "unsupported document version {found} (expected {expected})",
        expected = FORMAT_VERSION
    )]
    Version { found: u64 },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Key of a persisted document.
///
/// Restricted to ASCII alphanumerics, `_` and `-` so it is always a safe
/// file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> StorageResult<Self> {
        let id = id.into();
        let valid = !id.is_empty()
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if valid {
            Ok(Self(id))
        } else {
            Err(StorageError::InvalidId(id))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document together with its user-facing title.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub title: String,
    pub document: Document,
}

impl StoredDocument {
    pub fn new(title: impl Into<String>, document: Document) -> Self {
        Self {
            title: title.into(),
            document,
        }
    }
}

/// Whole-document load/save.
pub trait DocumentStore {
    /// Fetch a document. `Ok(None)` means no document has that id.
    fn load(&self, id: &DocumentId) -> StorageResult<Option<StoredDocument>>;

    /// Create or overwrite a document.
    fn save(&mut self, id: &DocumentId, doc: &StoredDocument) -> StorageResult<()>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    docs: HashMap<DocumentId, StoredDocument>,
    saves: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document without counting it as a save.
    pub fn insert(&mut self, id: DocumentId, doc: StoredDocument) {
        self.docs.insert(id, doc);
    }

    #[must_use]
    pub fn get(&self, id: &DocumentId) -> Option<&StoredDocument> {
        self.docs.get(id)
    }

    /// Number of successful [`save`](DocumentStore::save) calls.
    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.saves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, id: &DocumentId) -> StorageResult<Option<StoredDocument>> {
        Ok(self.docs.get(id).cloned())
    }

    fn save(&mut self, id: &DocumentId, doc: &StoredDocument) -> StorageResult<()> {
        self.docs.insert(id.clone(), doc.clone());
        self.saves += 1;
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

#[derive(Serialize)]
struct FileRef<'a> {
    version: u64,
    title: &'a str,
    content: &'a Document,
}

#[derive(Deserialize)]
struct FileOwned {
    version: u64,
    title: String,
    content: Document,
}

/// Directory of `<id>.json` files.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use `root`, creating it if missing.
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_for(&self, id: &DocumentId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl DocumentStore for FileStore {
    fn load(&self, id: &DocumentId) -> StorageResult<Option<StoredDocument>> {
        let path = self.path_for(id);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let file: FileOwned = serde_json::from_str(&contents)?;
        if file.version != FORMAT_VERSION {
            return Err(StorageError::Version {
                found: file.version,
            });
        }
        Ok(Some(StoredDocument {
            title: file.title,
            document: file.content,
        }))
    }

    fn save(&mut self, id: &DocumentId, doc: &StoredDocument) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(&FileRef {
            version: FORMAT_VERSION,
            title: &doc.title,
            content: &doc.document,
        })?;

        let path = self.path_for(id);
        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &path)?;
        tracing::trace!(target: "carousel.autosave", path = %path.display(), "wrote document");
        Ok(())
    }
}
