//! Domain layer for apigen.
//!
//! Pure business logic: resource naming, field typing, key:value argument
//! parsing, and project layout. Nothing in this module performs I/O — the
//! application services combine these types with ports to do real work.

pub mod error;
pub mod fields;
pub mod kv;
pub mod layout;
pub mod resource;

pub use error::{DomainError, ErrorCategory};
pub use fields::{FieldDef, FieldMap, FieldType, FieldValue, parse_field_defs};
pub use kv::parse_kv_args;
pub use layout::{ArtifactKind, HttpMethod, ProjectLayout};
pub use resource::ResourceName;

/// A persisted JSON document: the schema document or the data store document.
///
/// Both on-disk files are a single top-level JSON object keyed by plural
/// resource name; an empty or missing file maps to an empty `Document`.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// One stored instance record. Always carries an `"id"` entry.
pub type Record = serde_json::Map<String, serde_json::Value>;
