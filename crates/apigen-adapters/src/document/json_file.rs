//! File-backed JSON document store.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use apigen_core::{
    application::{ApplicationError, ports::DocumentStore},
    domain::Document,
    error::{CoreError, CoreResult},
};

/// Production document store bound to one JSON file.
///
/// A missing or blank file reads as an empty document; malformed JSON is
/// fatal and surfaces the parser's message. Saves rewrite the whole file
/// (pretty-printed, 2-space indent) with no fsync or atomic rename; the
/// tool targets single-developer local scaffolding.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> CoreResult<Document> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "document missing, treating as empty");
                return Ok(Document::new());
            }
            Err(e) => return Err(map_io_error(&self.path, e, "read document")),
        };

        if text.trim().is_empty() {
            return Ok(Document::new());
        }

        serde_json::from_str(&text).map_err(|e| {
            ApplicationError::MalformedDocument {
                path: self.path.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn save(&self, doc: &Document) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create data directory"))?;
        }
        let text = serde_json::to_string_pretty(doc).map_err(|e| {
            ApplicationError::MalformedDocument {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;
        std::fs::write(&self.path, text).map_err(|e| map_io_error(&self.path, e, "write document"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CoreError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_loads_as_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data_schema.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn blank_file_loads_as_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data_store.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(JsonFileStore::new(path).load().unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_fatal_with_parse_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data_store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(path).load().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Application(ApplicationError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn save_creates_parent_directories_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("src").join("data").join("data_store.json");
        let store = JsonFileStore::new(&path);

        let mut doc = Document::new();
        doc.insert("widgets".into(), json!([{"id": "1", "color": "red"}]));
        store.save(&doc).unwrap();

        assert!(path.exists());
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn save_is_a_whole_document_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("doc.json"));

        let mut first = Document::new();
        first.insert("a".into(), json!(1));
        store.save(&first).unwrap();

        let mut second = Document::new();
        second.insert("b".into(), json!(2));
        store.save(&second).unwrap();

        let loaded = store.load().unwrap();
        assert!(!loaded.contains_key("a"));
        assert!(loaded.contains_key("b"));
    }
}
