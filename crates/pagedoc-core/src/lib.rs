//! pagedoc-core: Core types for the pagedoc document manager
//!
//! This crate provides:
//! - Identifier newtypes for documents and pages
//! - The document/page hierarchy shared by pagination, search and storage
//! - `NewPage`, the unsaved page produced by the paginator

pub mod types;

// Re-export commonly used types at crate root for convenience
pub use types::{Document, DocumentId, NewPage, Page, PageId};
