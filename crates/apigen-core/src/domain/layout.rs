//! Target-project layout: where every generated file and document lives.
//!
//! All paths hang off a single root (the target project directory), so tests
//! can point the layout at a temp directory or an in-memory filesystem.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::DomainError;
use super::resource::ResourceName;

/// The three generated artifact kinds for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Controller,
    Route,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [Self::Model, Self::Controller, Self::Route];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Controller => "controller",
            Self::Route => "route",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP methods the single-route generator accepts.
///
/// Parsed (and therefore validated) before any file is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            other => Err(DomainError::UnsupportedMethod {
                method: other.into(),
            }),
        }
    }
}

/// Canonical locations inside the target project.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.src_dir().join("models")
    }

    pub fn controllers_dir(&self) -> PathBuf {
        self.src_dir().join("controllers")
    }

    pub fn routes_dir(&self) -> PathBuf {
        self.src_dir().join("routes")
    }

    pub fn services_dir(&self) -> PathBuf {
        self.src_dir().join("services")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.src_dir().join("data")
    }

    pub fn schema_file(&self) -> PathBuf {
        self.data_dir().join("data_schema.json")
    }

    pub fn store_file(&self) -> PathBuf {
        self.data_dir().join("data_store.json")
    }

    /// Single-slot schema backup, overwritten on every destructive change.
    pub fn schema_backup_file(&self) -> PathBuf {
        self.src_dir().join("backups").join("schema_backup.json")
    }

    pub fn server_file(&self) -> PathBuf {
        self.src_dir().join("server.js")
    }

    pub fn server_backup_file(&self) -> PathBuf {
        self.src_dir().join("server.backup.js")
    }

    pub fn data_service_file(&self) -> PathBuf {
        self.services_dir().join("dataService.js")
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.root.join("package.json")
    }

    /// Canonical path for a resource's artifact.
    ///
    /// Models are keyed by singular name; controllers and routes by plural
    /// name.
    pub fn artifact_path(&self, kind: ArtifactKind, resource: &ResourceName) -> PathBuf {
        match kind {
            ArtifactKind::Model => self.models_dir().join(format!("{}.js", resource.singular())),
            ArtifactKind::Controller => self
                .controllers_dir()
                .join(format!("{}Controller.js", resource.plural())),
            ArtifactKind::Route => self.routes_dir().join(format!("{}.js", resource.plural())),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
