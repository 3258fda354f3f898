//! Error types for the storage and editor layer.

use pagedoc_core::DocumentId;
use pagedoc_text::{SearchError, TfIdfError};
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage and editor operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document not found.
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Page not found within an existing document.
    #[error("page {page_number} not found in document {document_id}")]
    PageNotFound {
        document_id: DocumentId,
        page_number: u32,
    },

    /// File name is empty or blank.
    #[error("invalid file name: {0:?}")]
    InvalidFileName(String),

    /// File extension is not accepted for import.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// File exceeds the configured import limit.
    #[error("file too large: {size} bytes exceeds limit of {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    /// Reading an import file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Keyword search rejected its input.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// TF-IDF scoring failed.
    #[error(transparent)]
    TfIdf(#[from] TfIdfError),

    /// Internal lock error.
    #[error("internal lock error")]
    LockPoisoned,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::LockPoisoned
    }
}
