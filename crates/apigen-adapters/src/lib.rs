//! Infrastructure adapters for apigen.
//!
//! This crate implements the ports defined in `apigen_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod document;
pub mod express_templates;
pub mod filesystem;
pub mod snapshot;

// Re-export commonly used adapters
pub use document::{JsonFileStore, MemoryStore};
pub use express_templates::ExpressTemplates;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use snapshot::{FileSnapshotStore, MemorySnapshotStore};
