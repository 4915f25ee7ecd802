#![forbid(unsafe_code)]

//! Session-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::generate::GenerateError;
use crate::storage::{DocumentId, StorageError};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("document {0} not found")]
    NotFound(DocumentId),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, EditorError>;
