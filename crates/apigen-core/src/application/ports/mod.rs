//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `apigen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ArtifactKind, Document, FieldMap, HttpMethod, ResourceName};
use crate::error::CoreResult;

/// Port for one file-backed JSON document (schema or data store).
///
/// Each instance is bound to a single document. Implementations must treat a
/// missing or empty backing file as an empty document, and must rewrite the
/// whole document on save (last writer wins — there is deliberately no
/// locking or optimistic versioning).
///
/// Implemented by:
/// - `apigen_adapters::document::JsonFileStore` (production)
/// - `apigen_adapters::document::MemoryStore` (testing)
pub trait DocumentStore: Send + Sync {
    /// Load the full document. Missing/empty file → empty document;
    /// malformed JSON → error carrying the parse message.
    fn load(&self) -> CoreResult<Document>;

    /// Persist the full document, replacing the previous contents.
    fn save(&self, doc: &Document) -> CoreResult<()>;
}

/// Port for the single-slot schema backup.
///
/// Each call overwrites the previous snapshot unconditionally — only the most
/// recent destructive change is recoverable.
pub trait SnapshotStore: Send + Sync {
    fn snapshot(&self, doc: &Document) -> CoreResult<()>;
}

/// Port for filesystem operations on generated artifacts.
///
/// Implemented by:
/// - `apigen_adapters::filesystem::LocalFilesystem` (production)
/// - `apigen_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CoreResult<()>;

    /// Write content to a file, replacing any previous contents.
    fn write_file(&self, path: &Path, content: &str) -> CoreResult<()>;

    /// Read a file to a string.
    fn read_to_string(&self, path: &Path) -> CoreResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file. Missing file is an error; callers that tolerate
    /// missing files check `exists` first.
    fn remove_file(&self, path: &Path) -> CoreResult<()>;
}

/// Port for artifact text generation.
///
/// Rendering is a pure mapping from (resource, fields) to source text — no
/// I/O — so implementations are independently testable against literal
/// expected-output strings.
///
/// Implemented by `apigen_adapters::express_templates::ExpressTemplates`.
pub trait ArtifactRenderer: Send + Sync {
    /// Render one of the three per-resource artifacts.
    fn render(&self, kind: ArtifactKind, resource: &ResourceName, fields: &FieldMap) -> String;

    /// Render a single method-specific route handler for injection into the
    /// standalone server module.
    fn method_route(&self, method: HttpMethod, resource: &str, param: Option<&str>) -> String;

    /// Render the standalone server module.
    fn server_module(&self) -> String;

    /// Render the shared data-service module the controllers import.
    fn data_service_module(&self) -> String;
}
