//! Repository layer: the storage collaborator behind the editor.
//!
//! The editor never reaches for a global connection. It is constructed with
//! a [`DocumentRepository`] and every storage call goes through it. This
//! module also ships [`MemoryRepository`], an in-memory implementation that
//! assigns sequential integer identities.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use pagedoc_core::{Document, DocumentId, NewPage, PageId};
use pagedoc_text::paginate;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Storage operations the editor relies on.
pub trait DocumentRepository: Send + Sync {
    /// Stores a new document built from `pages`, assigning identities.
    fn insert_document(&self, name: &str, pages: Vec<NewPage>) -> StoreResult<Document>;

    /// Fetches one document with its pages.
    fn get_document(&self, id: DocumentId) -> StoreResult<Document>;

    /// Lists every document in insertion order.
    fn list_documents(&self) -> StoreResult<Vec<Document>>;

    /// Renames a document and replaces the content of one of its pages.
    ///
    /// The document's text is paginated again afterwards, so page
    /// boundaries stay at fixed widths and the page count may change.
    fn update_page(
        &self,
        id: DocumentId,
        name: &str,
        page_number: u32,
        content: &str,
    ) -> StoreResult<Document>;

    /// Removes a document and its pages.
    fn delete_document(&self, id: DocumentId) -> StoreResult<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
    documents: BTreeMap<DocumentId, Document>,
    last_document_id: i64,
    last_page_id: i64,
}

/// Thread-safe in-memory document repository.
///
/// Cloning yields another handle to the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentRepository for MemoryRepository {
    fn insert_document(&self, name: &str, pages: Vec<NewPage>) -> StoreResult<Document> {
        let mut state = self.state.write()?;

        state.last_document_id += 1;
        let id = DocumentId(state.last_document_id);

        let mut stored = Vec::with_capacity(pages.len());
        for page in pages {
            state.last_page_id += 1;
            stored.push(page.into_page(PageId(state.last_page_id), id));
        }

        let document = Document::new(id, name).with_pages(stored);
        state.documents.insert(id, document.clone());

        debug!(document_id = %id, pages = document.page_count(), "stored document");
        Ok(document)
    }

    fn get_document(&self, id: DocumentId) -> StoreResult<Document> {
        self.state
            .read()?
            .documents
            .get(&id)
            .cloned()
            .ok_or(StoreError::DocumentNotFound(id))
    }

    fn list_documents(&self) -> StoreResult<Vec<Document>> {
        Ok(self.state.read()?.documents.values().cloned().collect())
    }

    fn update_page(
        &self,
        id: DocumentId,
        name: &str,
        page_number: u32,
        content: &str,
    ) -> StoreResult<Document> {
        let mut guard = self.state.write()?;
        let state = &mut *guard;
        let document = state
            .documents
            .get_mut(&id)
            .ok_or(StoreError::DocumentNotFound(id))?;

        let page = document
            .page_mut(page_number)
            .ok_or(StoreError::PageNotFound {
                document_id: id,
                page_number,
            })?;
        page.content = content.to_string();

        // Re-cut the edited text so page boundaries stay at fixed widths.
        // Surviving page numbers keep their ids.
        let text = document.full_text();
        let mut old_ids = document.pages.iter().map(|page| page.id);
        let mut pages = Vec::new();
        for new_page in paginate(Some(&text)) {
            let page_id = match old_ids.next() {
                Some(page_id) => page_id,
                None => {
                    state.last_page_id += 1;
                    PageId(state.last_page_id)
                }
            };
            pages.push(new_page.into_page(page_id, id));
        }
        document.pages = pages;

        document.name = name.to_string();
        document.updated = Utc::now();

        debug!(
            document_id = %id,
            page_number,
            pages = document.page_count(),
            "updated page"
        );
        Ok(document.clone())
    }

    fn delete_document(&self, id: DocumentId) -> StoreResult<()> {
        self.state
            .write()?
            .documents
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::DocumentNotFound(id))
    }
}
