//! apigen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the apigen
//! CRUD-scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           apigen-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (SchemaRegistry, ScaffoldService,       │
//! │  InstanceStore, RouteInjector)          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (DocumentStore, Snapshot, Filesystem,   │
//! │  ArtifactRenderer)                      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    apigen-adapters (Infrastructure)     │
//! │ (JsonFileStore, LocalFilesystem,        │
//! │  ExpressTemplates, ...)                 │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ResourceName, FieldType, kv parser,    │
//! │  ProjectLayout) — No External I/O       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apigen_core::{
//!     application::{ScaffoldService, ScaffoldOptions, SchemaRegistry, SchemaMode},
//!     domain::{ProjectLayout, ResourceName, parse_field_defs},
//! };
//!
//! let resource = ResourceName::parse("widget")?;
//! let defs = parse_field_defs(&["color:string".into()])?;
//!
//! // Application services take injected adapters.
//! let registry = SchemaRegistry::new(schema_store, snapshot);
//! let (fields, _) = registry.define_or_extend(resource.plural(), &defs, SchemaMode::default())?;
//!
//! let service = ScaffoldService::new(filesystem, renderer, layout);
//! service.scaffold(&resource, &fields, &ScaffoldOptions::default())?;
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArtifactOutcome, ArtifactReport, InstanceStore, RouteInjector, ScaffoldOptions,
        ScaffoldService, SchemaMode, SchemaOutcome, SchemaRegistry,
        ports::{ArtifactRenderer, DocumentStore, Filesystem, SnapshotStore},
    };
    pub use crate::domain::{
        ArtifactKind, Document, FieldDef, FieldMap, FieldType, FieldValue, HttpMethod,
        ProjectLayout, Record, ResourceName, parse_field_defs, parse_kv_args,
    };
    pub use crate::error::{CoreError, CoreResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
