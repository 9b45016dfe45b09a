//! Document repository: the single source of truth for custody and history
//!
//! Insertion order is preserved so reloaded state lists documents the same
//! way the session that wrote them did. All access goes through a
//! `parking_lot` lock; operations are atomic with respect to the
//! observable document set (readers never see a document mid-transition).

use dtk_domain::{Document, DocumentId};
use parking_lot::RwLock;

/// Holds the set of all documents.
#[derive(Debug, Default)]
pub struct DocumentRepository {
    documents: RwLock<Vec<Document>>,
}

impl DocumentRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository from previously persisted documents.
    #[must_use]
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Number of documents held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Whether the repository holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Clone of a document by id.
    #[must_use]
    pub fn get(&self, id: DocumentId) -> Option<Document> {
        self.documents.read().iter().find(|d| d.id == id).cloned()
    }

    /// Clone of the full document set, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Document> {
        self.documents.read().clone()
    }

    /// Add a new document.
    pub fn insert(&self, document: Document) {
        self.documents.write().push(document);
    }

    /// Replace the stored document with the same id.
    ///
    /// Returns false when no document with that id exists.
    pub fn update(&self, document: &Document) -> bool {
        let mut documents = self.documents.write();
        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(slot) => {
                *slot = document.clone();
                true
            }
            None => false,
        }
    }

    /// Remove every document whose id is in `ids`. Permanent; no tombstone.
    ///
    /// Returns the number actually removed.
    pub fn remove_many(&self, ids: &[DocumentId]) -> usize {
        let mut documents = self.documents.write();
        let before = documents.len();
        documents.retain(|d| !ids.contains(&d.id));
        before - documents.len()
    }

    /// Replace the entire document set. Used when reloading persisted state.
    pub fn replace_all(&self, documents: Vec<Document>) {
        *self.documents.write() = documents;
    }
}
