//! pagedoc-text: Text indexing and retrieval for the pagedoc document manager
//!
//! This crate provides:
//! - Fixed-width pagination of raw document text
//! - An append-only corpus with TF-IDF scoring of arbitrary text
//! - Case-insensitive keyword search with contextual snippets
//!
//! ## Modules
//!
//! - [`paginate`]: Splits text into 100-character pages
//! - [`tfidf`]: Corpus statistics and the TF-IDF scorer
//! - [`search`]: First-match-per-document keyword search
//!
//! ## Example Usage
//!
//! ```rust
//! use pagedoc_text::{paginate, CorpusIndex};
//!
//! let pages = paginate(Some("The quick brown fox jumps over the lazy dog"));
//! assert_eq!(pages.len(), 1);
//!
//! let corpus = CorpusIndex::new();
//! corpus.add_document_to_corpus("the cat sat on the mat").unwrap();
//! corpus.add_document_to_corpus("the dog sat on the log").unwrap();
//!
//! let score = corpus.calculate_document_tfidf(Some("the cat")).unwrap();
//! assert!(score > 0.0);
//! ```

pub use pagedoc_core;

pub mod paginate;
pub mod search;
pub mod tfidf;

// Re-export main types for convenience
pub use paginate::{PAGE_SIZE, join_pages, page_count, paginate};
pub use search::{MIN_KEYWORD_LENGTH, MatchResult, SearchError, find_matches, search_keyword};
pub use tfidf::{CorpusIndex, CorpusStats, TfIdfError};
