//! Implementation of the `apigen route` command.
//!
//! The method string is validated before any file is read or written so a
//! typo like `patch` cannot leave a half-modified server module.

use tracing::instrument;

use apigen_adapters::{ExpressTemplates, LocalFilesystem};
use apigen_core::{
    application::RouteInjector,
    domain::{HttpMethod, ProjectLayout},
};

use crate::{
    cli::{RouteArgs, global::GlobalArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `apigen route` command.
#[instrument(skip_all, fields(resource = %args.resource, method = %args.method))]
pub fn execute(args: RouteArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let method: HttpMethod = args
        .method
        .parse()
        .map_err(|e: apigen_core::domain::DomainError| CliError::Core(e.into()))?;

    let layout = ProjectLayout::new(global.project_root());
    let injector = RouteInjector::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ExpressTemplates::new()),
        layout.clone(),
    );

    injector
        .inject(&args.resource, method, args.param.as_deref())
        .map_err(CliError::Core)?;

    let path_suffix = args
        .param
        .as_deref()
        .map(|p| format!("/:{p}"))
        .unwrap_or_default();
    output.success(&format!(
        "Added {} /{}{} to {}",
        args.method.to_uppercase(),
        args.resource,
        path_suffix,
        layout.server_file().display()
    ))?;
    output.info(&format!(
        "Previous server backed up to {}",
        layout.server_backup_file().display()
    ))?;

    Ok(())
}
