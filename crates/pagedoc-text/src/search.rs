//! Keyword search over documents with contextual snippets.
//!
//! This module provides:
//! - Case-insensitive keyword lookup across a document/page hierarchy
//! - First-match-per-document result policy
//! - Snippets made of the matched word and the word before it
//!
//! ## Example Usage
//!
//! ```rust
//! use pagedoc_text::pagedoc_core::{Document, DocumentId, Page, PageId};
//! use pagedoc_text::search::search_keyword;
//!
//! let doc = Document::new(DocumentId(1), "fox.txt").with_pages(vec![Page::new(
//!     PageId(1),
//!     DocumentId(1),
//!     1,
//!     "The quick brown fox jumps over the lazy dog",
//! )]);
//!
//! let hits = search_keyword("brown", &[doc]).unwrap();
//! assert_eq!(hits, vec!["fox.txt (page 1): quick brown"]);
//! ```

use std::fmt;
use std::ops::Range;

use pagedoc_core::{Document, DocumentId, Page};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Shortest keyword, in characters, accepted by a search.
pub const MIN_KEYWORD_LENGTH: usize = 3;

/// Errors that can occur during search operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The keyword is shorter than [`MIN_KEYWORD_LENGTH`].
    #[error("keyword must be at least {min} letters long, got {actual}")]
    KeywordTooShort { min: usize, actual: usize },
}

/// A search hit with the context it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The document containing the match.
    pub document_id: DocumentId,

    /// Display name of that document.
    pub document_name: String,

    /// Page the match was found on.
    pub page_number: u32,

    /// The word immediately before the match, if any.
    pub prefix: Option<String>,

    /// The matched word, as written in the page.
    pub matched: String,
}

impl MatchResult {
    /// The preceding word and the match joined by a single space.
    pub fn snippet(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{} {}", prefix, self.matched),
            None => self.matched.clone(),
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (page {}): {}",
            self.document_name,
            self.page_number,
            self.snippet()
        )
    }
}

/// Searches `documents` for `keyword` and renders one line per hit.
///
/// See [`find_matches`] for the matching rules.
pub fn search_keyword(keyword: &str, documents: &[Document]) -> Result<Vec<String>, SearchError> {
    Ok(find_matches(keyword, documents)?
        .iter()
        .map(ToString::to_string)
        .collect())
}

/// Searches `documents` for `keyword`.
///
/// Matching is a case-insensitive substring match. Each document yields at
/// most one result: pages are scanned in page-number order and the first
/// occurrence on the first matching page wins. Results follow the input
/// document order.
///
/// # Errors
///
/// Returns `SearchError::KeywordTooShort` when the keyword has fewer than
/// [`MIN_KEYWORD_LENGTH`] characters, before any document is examined.
pub fn find_matches(
    keyword: &str,
    documents: &[Document],
) -> Result<Vec<MatchResult>, SearchError> {
    let length = keyword.chars().count();
    if length < MIN_KEYWORD_LENGTH {
        return Err(SearchError::KeywordTooShort {
            min: MIN_KEYWORD_LENGTH,
            actual: length,
        });
    }

    let needle: Vec<char> = keyword.chars().flat_map(char::to_lowercase).collect();
    let hits: Vec<MatchResult> = documents
        .iter()
        .filter_map(|doc| first_match(doc, &needle))
        .collect();

    debug!(
        keyword,
        documents = documents.len(),
        hits = hits.len(),
        "keyword search finished"
    );
    Ok(hits)
}

fn first_match(doc: &Document, needle: &[char]) -> Option<MatchResult> {
    let mut pages: Vec<&Page> = doc.pages.iter().collect();
    pages.sort_by_key(|page| page.page_number);

    pages.into_iter().find_map(|page| {
        let text = page.content.as_str();
        let found = find_ignore_case(text, needle)?;
        let word = widen_to_word(text, found);

        Some(MatchResult {
            document_id: doc.id,
            document_name: doc.name.clone(),
            page_number: page.page_number,
            prefix: text[..word.start].unicode_words().next_back().map(str::to_string),
            matched: text[word].to_string(),
        })
    })
}

/// Byte range of the first case-insensitive occurrence of `needle`.
///
/// `needle` must already be lowercased. Comparison is done per character so
/// byte offsets always refer to `haystack`, even when lowercasing changes a
/// character's encoded length.
fn find_ignore_case(haystack: &str, needle: &[char]) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }

    haystack.char_indices().find_map(|(start, _)| {
        match_len_at(&haystack[start..], needle).map(|len| start..start + len)
    })
}

fn match_len_at(text: &str, needle: &[char]) -> Option<usize> {
    let mut wanted = needle.iter();
    let mut consumed = 0;

    for c in text.chars() {
        for lower in c.to_lowercase() {
            if wanted.next() != Some(&lower) {
                return None;
            }
        }
        consumed += c.len_utf8();
        if wanted.as_slice().is_empty() {
            return Some(consumed);
        }
    }

    None
}

/// Extends a match over the alphanumeric run it sits in.
///
/// A side is only extended when the match itself is alphanumeric at that
/// side, so punctuation keywords are reported as typed.
fn widen_to_word(text: &str, found: Range<usize>) -> Range<usize> {
    let matched = &text[found.clone()];

    let start = if matched.chars().next().is_some_and(char::is_alphanumeric) {
        text[..found.start]
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_alphanumeric())
            .last()
            .map_or(found.start, |(idx, _)| idx)
    } else {
        found.start
    };

    let end = if matched.chars().next_back().is_some_and(char::is_alphanumeric) {
        text[found.end..]
            .char_indices()
            .take_while(|(_, c)| c.is_alphanumeric())
            .last()
            .map_or(found.end, |(idx, c)| found.end + idx + c.len_utf8())
    } else {
        found.end
    };

    start..end
}
