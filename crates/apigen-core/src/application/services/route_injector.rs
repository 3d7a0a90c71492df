//! Method-specific route injection into the standalone server module.
//!
//! Appends one Express handler immediately before the `app.listen(` call.
//! The server file is backed up first; a failed write restores the backup
//! (best effort), mirroring the rollback-on-failure pattern used elsewhere.

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ArtifactRenderer, Filesystem},
    },
    domain::{HttpMethod, ProjectLayout},
    error::CoreResult,
};

const LISTEN_MARKER: &str = "app.listen(";

pub struct RouteInjector {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn ArtifactRenderer>,
    layout: ProjectLayout,
}

impl RouteInjector {
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

    /// Splice a `method` handler for `resource` into the server module.
    ///
    /// The method is already validated by construction (`HttpMethod` only
    /// holds supported verbs), so no file is touched for a bad method name.
    #[instrument(skip_all, fields(%method, resource, param))]
    pub fn inject(&self, resource: &str, method: HttpMethod, param: Option<&str>) -> CoreResult<()> {
        let server_path = self.layout.server_file();
        if !self.filesystem.exists(&server_path) {
            return Err(ApplicationError::ServerFileMissing { path: server_path }.into());
        }

        let original = self.filesystem.read_to_string(&server_path)?;
        if !original.contains(LISTEN_MARKER) {
            return Err(ApplicationError::MarkerNotFound { path: server_path }.into());
        }

        // Backup before modifying, so a bad write is recoverable.
        let backup_path = self.layout.server_backup_file();
        self.filesystem.write_file(&backup_path, &original)?;

        let route = self.renderer.method_route(method, resource, param);
        let updated = original.replacen(
            LISTEN_MARKER,
            &format!("{route}\n\n{LISTEN_MARKER}"),
            1,
        );

        if let Err(e) = self.filesystem.write_file(&server_path, &updated) {
            warn!("server write failed, restoring backup");
            if let Err(restore) = self.filesystem.write_file(&server_path, &original) {
                warn!(error = %restore, "backup restoration failed");
            }
            return Err(e);
        }

        info!(path = %server_path.display(), "route injected");
        Ok(())
    }
}
