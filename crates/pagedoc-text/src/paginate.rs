//! Fixed-width pagination of document text.
//!
//! Text is cut into consecutive pages of [`PAGE_SIZE`] characters (Unicode
//! scalar values, never bytes). There is no word-boundary adjustment, no
//! trimming and no line-ending normalization: concatenating the pages in
//! order always gives back the input exactly.

use pagedoc_core::{NewPage, Page};
use tracing::debug;

/// Number of characters on every page except possibly the last.
pub const PAGE_SIZE: usize = 100;

/// Splits `content` into numbered pages.
///
/// A missing or empty input yields a single empty page numbered 1. Otherwise
/// the result holds `ceil(chars / PAGE_SIZE)` pages numbered `1..=N`; every
/// page but the last has exactly [`PAGE_SIZE`] characters and the last holds
/// the remaining 1 to [`PAGE_SIZE`].
///
/// Runs in linear time and never fails.
pub fn paginate(content: Option<&str>) -> Vec<NewPage> {
    let text = match content {
        Some(text) if !text.is_empty() => text,
        _ => return vec![new_page(1, "")],
    };

    let mut pages = Vec::with_capacity(text.len() / PAGE_SIZE + 1);
    let mut start = 0;
    let mut chars_on_page = 0;

    for (idx, _) in text.char_indices() {
        if chars_on_page == PAGE_SIZE {
            pages.push(new_page(pages.len() + 1, &text[start..idx]));
            start = idx;
            chars_on_page = 0;
        }
        chars_on_page += 1;
    }
    pages.push(new_page(pages.len() + 1, &text[start..]));

    debug!(pages = pages.len(), bytes = text.len(), "paginated text");
    pages
}

/// Number of pages [`paginate`] would produce, without building them.
pub fn page_count(content: Option<&str>) -> usize {
    content
        .map(|text| text.chars().count().div_ceil(PAGE_SIZE))
        .unwrap_or(0)
        .max(1)
}

/// Concatenates page contents in ascending page-number order.
pub fn join_pages(pages: &[Page]) -> String {
    let mut ordered: Vec<&Page> = pages.iter().collect();
    ordered.sort_by_key(|page| page.page_number);
    ordered.into_iter().map(|page| page.content.as_str()).collect()
}

/// Page numbers saturate at `u32::MAX`.
fn new_page(page_number: usize, content: &str) -> NewPage {
    NewPage {
        page_number: u32::try_from(page_number).unwrap_or(u32::MAX),
        content: content.to_string(),
    }
}
