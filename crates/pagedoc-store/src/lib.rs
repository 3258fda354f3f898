//! pagedoc-store: Document storage and the editor service
//!
//! This crate provides:
//! - A `DocumentRepository` trait, the storage collaborator the editor is
//!   constructed with
//! - `MemoryRepository`, a thread-safe in-memory implementation
//! - `Editor`, which paginates, indexes, searches and scores documents
//! - `ImportConfig` for text file imports
//!
//! # Usage
//!
//! ```rust
//! use pagedoc_store::{Editor, MemoryRepository};
//!
//! let editor = Editor::new(MemoryRepository::new());
//! let doc = editor.create_file("notes.txt", "The quick brown fox").unwrap();
//! assert_eq!(doc.page_count(), 1);
//!
//! let hits = editor.search("brown").unwrap();
//! assert_eq!(hits, vec!["notes.txt (page 1): quick brown"]);
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod repository;

pub use config::{ConfigError, ImportConfig};
pub use editor::Editor;
pub use error::{StoreError, StoreResult};
pub use repository::{DocumentRepository, MemoryRepository};

// Re-export the text crate for downstream users
pub use pagedoc_text;
