//! Single-slot snapshot stores for the schema backup.
//!
//! The backup contract is deliberately blunt: one fixed slot, overwritten
//! unconditionally on every snapshot. Only the most recent destructive
//! change is recoverable.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::debug;

use apigen_core::{
    application::{ApplicationError, ports::SnapshotStore},
    domain::Document,
    error::CoreResult,
};

/// File-backed single-slot snapshot (production).
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn snapshot(&self, doc: &Document) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApplicationError::SnapshotFailed {
                reason: format!("create backup directory: {e}"),
            })?;
        }
        let text = serde_json::to_string_pretty(doc).map_err(|e| {
            ApplicationError::SnapshotFailed {
                reason: e.to_string(),
            }
        })?;
        std::fs::write(&self.path, text).map_err(|e| {
            ApplicationError::SnapshotFailed {
                reason: format!("write {}: {e}", self.path.display()),
            }
        })?;
        debug!(path = %self.path.display(), "schema snapshot written");
        Ok(())
    }
}

/// In-memory single-slot snapshot (testing).
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    last: Arc<RwLock<Option<Document>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent snapshot, if any (testing helper).
    pub fn last(&self) -> Option<Document> {
        self.last.read().unwrap().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn snapshot(&self, doc: &Document) -> CoreResult<()> {
        *self
            .last
            .write()
            .map_err(|_| ApplicationError::StoreLockError)? = Some(doc.clone());
        Ok(())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_snapshot_overwrites_previous_slot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backups").join("schema_backup.json");
        let store = FileSnapshotStore::new(&path);

        let mut first = Document::new();
        first.insert("widgets".into(), json!({"id": "string"}));
        store.snapshot(&first).unwrap();

        let mut second = Document::new();
        second.insert("gadgets".into(), json!({"id": "string"}));
        store.snapshot(&second).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("gadgets"));
        assert!(!text.contains("widgets"));
    }
}
