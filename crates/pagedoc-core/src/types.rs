//! Core data types for the pagedoc document manager.
//!
//! A document is a named, ordered sequence of pages. Pages are produced by
//! the paginator from a document's full text and carry a 1-based page
//! number that is unique and contiguous within their document.
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize` for
//! inspection, copying, and JSON serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a document.
///
/// Wraps the integer key assigned by the storage collaborator, providing type
/// safety to distinguish document IDs from page IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub i64);

impl DocumentId {
    /// Creates a DocumentId from a raw integer key.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer key.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Unique identifier for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub i64);

impl PageId {
    /// Creates a PageId from a raw integer key.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer key.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

// ============================================================================
// Core Domain Types
// ============================================================================

/// A page that has been cut from a document's text but not yet stored.
///
/// The paginator produces these; a storage collaborator turns them into
/// [`Page`]s by assigning identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPage {
    /// 1-based position of the page within its document.
    pub page_number: u32,

    /// The page text.
    pub content: String,
}

impl NewPage {
    /// Attaches storage identities, producing a stored page.
    #[must_use]
    pub fn into_page(self, id: PageId, document_id: DocumentId) -> Page {
        Page {
            id,
            document_id,
            page_number: self.page_number,
            content: self.content,
        }
    }
}

/// One fixed-size slice of a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Unique identifier for this page.
    pub id: PageId,

    /// The document this page belongs to.
    pub document_id: DocumentId,

    /// 1-based position of the page within its document.
    pub page_number: u32,

    /// The page text. Unbounded; no encoding assumptions beyond UTF-8.
    pub content: String,
}

impl Page {
    /// Creates a page with explicit identities.
    #[must_use]
    pub fn new(
        id: PageId,
        document_id: DocumentId,
        page_number: u32,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            document_id,
            page_number,
            content: content.into(),
        }
    }
}

/// A named document made of ordered pages.
///
/// `pages` is kept in ascending page-number order; concatenating the page
/// contents in that order yields the document's full text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier for this document.
    pub id: DocumentId,

    /// Human-readable display name (usually the file name).
    pub name: String,

    /// Pages in ascending page-number order.
    pub pages: Vec<Page>,

    /// When the document was created.
    pub created: DateTime<Utc>,

    /// When the document was last modified.
    pub updated: DateTime<Utc>,
}

impl Document {
    /// Creates an empty document with the given identity and name.
    #[must_use]
    pub fn new(id: DocumentId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            pages: Vec::new(),
            created: now,
            updated: now,
        }
    }

    /// Replaces the page list, sorting it by page number.
    #[must_use]
    pub fn with_pages(mut self, mut pages: Vec<Page>) -> Self {
        pages.sort_by_key(|page| page.page_number);
        self.pages = pages;
        self
    }

    /// Returns the page with the given 1-based number, if present.
    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|page| page.page_number == page_number)
    }

    /// Returns a mutable reference to the page with the given number.
    pub fn page_mut(&mut self, page_number: u32) -> Option<&mut Page> {
        self.pages
            .iter_mut()
            .find(|page| page.page_number == page_number)
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Reassembles the document's text from its pages in page order.
    pub fn full_text(&self) -> String {
        self.pages.iter().map(|page| page.content.as_str()).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
