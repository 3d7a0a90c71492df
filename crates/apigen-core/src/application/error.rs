//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A document file exists but its contents are not valid JSON. Fatal —
    /// the operator has to fix or delete the file.
    #[error("malformed JSON document at {path}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    /// A schema entry exists but does not have the expected shape
    /// (object of string type tags).
    #[error("malformed schema entry for '{resource}': {reason}")]
    MalformedSchema { resource: String, reason: String },

    /// No schema registered for a resource when one was required.
    #[error("no schema found for resource '{resource}'")]
    SchemaNotFound { resource: String },

    /// A record lookup by id (or name) came up empty.
    #[error("no '{resource}' record matching '{key}'")]
    RecordNotFound { resource: String, key: String },

    /// A data store entry exists but is not a list of records.
    #[error("data store entry for '{resource}' is not a list of records")]
    MalformedRecordList { resource: String },

    /// Filesystem operation failed.
    #[error("filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The server module to inject a route into does not exist.
    #[error("server file not found at {path}")]
    ServerFileMissing { path: PathBuf },

    /// The server module exists but lacks the `app.listen(` insertion marker.
    #[error("no `app.listen(` marker in {path}; cannot inject route")]
    MarkerNotFound { path: PathBuf },

    /// Writing the single-slot schema backup failed.
    #[error("schema backup failed: {reason}")]
    SnapshotFailed { reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("document store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedDocument { path, reason } => vec![
                format!("The file {} is not valid JSON", path.display()),
                format!("Parse failure: {}", reason),
                "Fix the JSON by hand, or delete the file to start fresh".into(),
            ],
            Self::SchemaNotFound { resource } => vec![
                format!("Resource '{}' has no schema yet", resource),
                format!("Define one first: apigen resource {} name:string", resource),
            ],
            Self::MalformedRecordList { resource } => vec![
                format!(
                    "The '{}' entry in src/data/data_store.json is not a JSON array",
                    resource
                ),
                "Fix the entry by hand, or delete it to start fresh".into(),
            ],
            Self::RecordNotFound { resource, key } => vec![
                format!("No '{}' record matches '{}'", resource, key),
                "List existing records in src/data/data_store.json".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ServerFileMissing { path } => vec![
                format!("Expected a server module at {}", path.display()),
                "Scaffold one first: apigen resource <name> --init-server".into(),
            ],
            Self::MarkerNotFound { .. } => vec![
                "The route injector appends before the `app.listen(` call".into(),
                "Restore the marker, or regenerate the server with --init-server".into(),
            ],
            Self::StoreLockError => vec![
                "The document store is locked".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SchemaNotFound { .. } | Self::RecordNotFound { .. } => ErrorCategory::NotFound,
            Self::MalformedDocument { .. }
            | Self::MalformedSchema { .. }
            | Self::MalformedRecordList { .. } => ErrorCategory::Configuration,
            Self::ServerFileMissing { .. } | Self::MarkerNotFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::SnapshotFailed { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
