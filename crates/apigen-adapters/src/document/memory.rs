//! In-memory document store for testing.

use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};

use apigen_core::{
    application::{ApplicationError, ports::DocumentStore},
    domain::Document,
    error::CoreResult,
};

/// In-memory document store for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Document>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a document.
    pub fn with_document(doc: Document) -> Self {
        let store = Self::new();
        *store.inner.write().unwrap() = doc;
        store
    }

    /// Snapshot of the current document (testing helper).
    pub fn document(&self) -> Document {
        self.inner.read().unwrap().clone()
    }

    /// Make subsequent `save` calls fail, for error-path tests.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> CoreResult<Document> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.clone())
    }

    fn save(&self, doc: &Document) -> CoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ApplicationError::StoreLockError.into());
        }
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        *inner = doc.clone();
        Ok(())
    }
}
