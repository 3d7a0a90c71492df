//! Application layer for apigen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SchemaRegistry, ScaffoldService,
//!   InstanceStore, RouteInjector)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ArtifactOutcome, ArtifactReport, InstanceStore, RouteInjector, ScaffoldOptions,
    ScaffoldService, SchemaMode, SchemaOutcome, SchemaRegistry,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ArtifactRenderer, DocumentStore, Filesystem, SnapshotStore};

pub use error::ApplicationError;
