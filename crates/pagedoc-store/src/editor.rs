//! Editor service: the single entry point for document operations.
//!
//! The editor ties a storage collaborator to the text core:
//! - creating or importing a file paginates its text, stores the pages and
//!   appends the full text to the TF-IDF corpus
//! - searching runs the keyword search over every stored document
//! - analysis scores text against the corpus
//!
//! The corpus is append-only, so updates and deletions do not remove text
//! that was already added to it.

use std::fs;
use std::path::Path;

use pagedoc_core::{Document, DocumentId};
use pagedoc_text::{CorpusIndex, paginate, search_keyword};
use tracing::{info, warn};

use crate::config::ImportConfig;
use crate::error::{StoreError, StoreResult};
use crate::repository::DocumentRepository;

/// Document editor over an injected repository.
#[derive(Debug)]
pub struct Editor<R> {
    repository: R,
    corpus: CorpusIndex,
    import: ImportConfig,
}

impl<R: DocumentRepository> Editor<R> {
    /// Creates an editor with an empty corpus and default import limits.
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, ImportConfig::default())
    }

    /// Creates an editor with custom import limits.
    pub fn with_config(repository: R, import: ImportConfig) -> Self {
        Self::with_corpus(repository, CorpusIndex::new(), import)
    }

    /// Creates an editor over an existing corpus handle.
    pub fn with_corpus(repository: R, corpus: CorpusIndex, import: ImportConfig) -> Self {
        Self {
            repository,
            corpus,
            import,
        }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Handle to the editor's corpus.
    pub fn corpus(&self) -> &CorpusIndex {
        &self.corpus
    }

    /// Import limits in effect.
    pub fn import_config(&self) -> &ImportConfig {
        &self.import
    }

    /// Creates a document from `content`.
    pub fn create_file(&self, name: &str, content: &str) -> StoreResult<Document> {
        validate_name(name)?;

        // Corpus first: a document is only stored once its text is indexed.
        self.corpus.add_document_to_corpus(content)?;
        let pages = paginate(Some(content));
        let document = self.repository.insert_document(name, pages)?;

        info!(
            document_id = %document.id,
            name,
            pages = document.page_count(),
            "created document"
        );
        Ok(document)
    }

    /// Renames a document and replaces one page's content.
    pub fn update_file(
        &self,
        id: DocumentId,
        name: &str,
        page_number: u32,
        content: &str,
    ) -> StoreResult<Document> {
        validate_name(name)?;

        let document = self.repository.update_page(id, name, page_number, content)?;
        info!(document_id = %id, page_number, "updated document");
        Ok(document)
    }

    /// Deletes a document and its pages.
    pub fn delete_file(&self, id: DocumentId) -> StoreResult<()> {
        self.repository.delete_document(id)?;
        info!(document_id = %id, "deleted document");
        Ok(())
    }

    /// Fetches one document.
    pub fn get_file(&self, id: DocumentId) -> StoreResult<Document> {
        self.repository.get_document(id)
    }

    /// Lists all documents.
    pub fn get_all_files(&self) -> StoreResult<Vec<Document>> {
        self.repository.list_documents()
    }

    /// Imports a UTF-8 text file as a new document named `name`.
    ///
    /// The file must carry an accepted extension and fit within the configured
    /// size limit.
    pub fn import_text_file(&self, path: &Path, name: &str) -> StoreResult<Document> {
        validate_name(name)?;

        if !self.import.accepts(path) {
            warn!(path = %path.display(), "rejected import: unsupported file type");
            return Err(StoreError::UnsupportedFileType(path.display().to_string()));
        }

        let size = fs::metadata(path)?.len();
        if size > self.import.max_file_bytes {
            warn!(path = %path.display(), size, "rejected import: file too large");
            return Err(StoreError::FileTooLarge {
                size,
                max: self.import.max_file_bytes,
            });
        }

        let content = fs::read_to_string(path)?;
        info!(path = %path.display(), size, "importing text file");
        self.create_file(name, &content)
    }

    /// Keyword search across every stored document.
    pub fn search(&self, keyword: &str) -> StoreResult<Vec<String>> {
        let documents = self.repository.list_documents()?;
        Ok(search_keyword(keyword, &documents)?)
    }

    /// Scores text against the corpus. `None` is rejected.
    pub fn analyze(&self, text: Option<&str>) -> StoreResult<f64> {
        Ok(self.corpus.calculate_document_tfidf(text)?)
    }

    /// Scores a stored document's current text against the corpus.
    pub fn analyze_file(&self, id: DocumentId) -> StoreResult<f64> {
        let document = self.repository.get_document(id)?;
        Ok(self.corpus.score(&document.full_text())?)
    }
}

fn validate_name(name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidFileName(name.to_string()));
    }
    Ok(())
}
