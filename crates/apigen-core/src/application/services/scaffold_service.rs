//! Scaffold service - the idempotent artifact generator.
//!
//! For each artifact kind (model, controller, route): compute the canonical
//! path, skip when it already exists (unless forced), otherwise render and
//! write. The three kinds are handled independently, so a partial prior run
//! is completed incrementally rather than treated as an error, and repeating
//! an invocation with identical arguments changes nothing after the first.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{ArtifactRenderer, Filesystem},
    domain::{ArtifactKind, FieldMap, ProjectLayout, ResourceName},
    error::CoreResult,
};

/// Caller knobs for one scaffold run.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Restrict generation to exactly one artifact kind.
    pub only: Option<ArtifactKind>,
    /// Regenerate existing artifacts, discarding manual edits.
    pub force: bool,
}

/// What happened to one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOutcome {
    Created,
    Skipped,
    Overwritten,
}

/// Per-artifact result of a scaffold run.
#[derive(Debug, Clone)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub outcome: ArtifactOutcome,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn ArtifactRenderer>,
    layout: ProjectLayout,
}

impl ScaffoldService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn ArtifactRenderer>,
        layout: ProjectLayout,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            layout,
        }
    }

    /// Ensure the resource's artifacts exist, creating only what is missing.
    #[instrument(skip_all, fields(resource = %resource, only = ?opts.only, force = opts.force))]
    pub fn scaffold(
        &self,
        resource: &ResourceName,
        fields: &FieldMap,
        opts: &ScaffoldOptions,
    ) -> CoreResult<Vec<ArtifactReport>> {
        self.ensure_data_service()?;

        let mut reports = Vec::new();
        for kind in ArtifactKind::ALL {
            if opts.only.is_some_and(|only| only != kind) {
                debug!(%kind, "not selected, skipping entirely");
                continue;
            }
            reports.push(self.ensure_artifact(kind, resource, fields, opts.force)?);
        }

        info!(
            created = reports
                .iter()
                .filter(|r| r.outcome != ArtifactOutcome::Skipped)
                .count(),
            skipped = reports
                .iter()
                .filter(|r| r.outcome == ArtifactOutcome::Skipped)
                .count(),
            "scaffold completed"
        );
        Ok(reports)
    }

    /// Delete the resource's artifact files. Missing files are ignored.
    /// Returns the paths actually removed.
    #[instrument(skip_all, fields(resource = %resource))]
    pub fn teardown(&self, resource: &ResourceName) -> CoreResult<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for kind in ArtifactKind::ALL {
            let path = self.layout.artifact_path(kind, resource);
            if self.filesystem.exists(&path) {
                self.filesystem.remove_file(&path)?;
                info!(path = %path.display(), "artifact deleted");
                removed.push(path);
            }
        }
        Ok(removed)
    }

    fn ensure_artifact(
        &self,
        kind: ArtifactKind,
        resource: &ResourceName,
        fields: &FieldMap,
        force: bool,
    ) -> CoreResult<ArtifactReport> {
        let path = self.layout.artifact_path(kind, resource);

        let outcome = if self.filesystem.exists(&path) {
            if !force {
                debug!(%kind, path = %path.display(), "exists, skipping");
                return Ok(ArtifactReport {
                    kind,
                    path,
                    outcome: ArtifactOutcome::Skipped,
                });
            }
            ArtifactOutcome::Overwritten
        } else {
            ArtifactOutcome::Created
        };

        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        let content = self.renderer.render(kind, resource, fields);
        self.filesystem.write_file(&path, &content)?;
        info!(%kind, path = %path.display(), ?outcome, "artifact written");

        Ok(ArtifactReport {
            kind,
            path,
            outcome,
        })
    }

    /// The controllers import a shared data-service module; write it once.
    fn ensure_data_service(&self) -> CoreResult<()> {
        let path = self.layout.data_service_file();
        if self.filesystem.exists(&path) {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem
            .write_file(&path, &self.renderer.data_service_module())?;
        info!(path = %path.display(), "data service written");
        Ok(())
    }
}
