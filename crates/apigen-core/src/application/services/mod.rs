//! Application services - use case orchestration.

pub mod instance_store;
pub mod route_injector;
pub mod scaffold_service;
pub mod schema_registry;

pub use instance_store::InstanceStore;
pub use route_injector::RouteInjector;
pub use scaffold_service::{ArtifactOutcome, ArtifactReport, ScaffoldOptions, ScaffoldService};
pub use schema_registry::{SchemaMode, SchemaOutcome, SchemaRegistry};
