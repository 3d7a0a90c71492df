//! Implementation of the `apigen destroy` subcommands.

use tracing::{info, instrument};

use apigen_adapters::{ExpressTemplates, FileSnapshotStore, JsonFileStore, LocalFilesystem};
use apigen_core::{
    application::{InstanceStore, ScaffoldService, SchemaRegistry},
    domain::ProjectLayout,
    error::CoreError,
};

use crate::{
    cli::{DestroyCommands, global::GlobalArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute an `apigen destroy` subcommand.
pub fn execute(cmd: DestroyCommands, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    match cmd {
        DestroyCommands::Resource { name } => destroy_resource(&name, &global, &output),
        DestroyCommands::Instance { resource, key } => {
            destroy_instance(&resource, &key, &global, &output)
        }
    }
}

/// Remove a resource's artifact files, schema entry, and records.
///
/// Destruction is deliberately tolerant: each of the three parts is removed
/// independently, so a resource in any partial state can be cleaned up.
#[instrument(skip_all, fields(resource = name))]
fn destroy_resource(name: &str, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let resource = super::parse_resource_name(name)?;
    let layout = ProjectLayout::new(global.project_root());

    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ExpressTemplates::new()),
        layout.clone(),
    );
    let removed = service.teardown(&resource).map_err(CliError::Core)?;
    for path in &removed {
        output.success(&format!("Deleted {}", path.display()))?;
    }

    let registry = SchemaRegistry::new(
        Box::new(JsonFileStore::new(layout.schema_file())),
        Box::new(FileSnapshotStore::new(layout.schema_backup_file())),
    );
    let had_schema = registry.remove(resource.plural()).map_err(CliError::Core)?;
    if had_schema {
        output.success(&format!("Removed schema entry '{}'", resource.plural()))?;
    }

    let instances = InstanceStore::new(Box::new(JsonFileStore::new(layout.store_file())));
    let had_records = instances
        .remove_resource(resource.plural())
        .map_err(CliError::Core)?;
    if had_records {
        output.success(&format!("Removed '{}' records", resource.plural()))?;
    }

    if removed.is_empty() && !had_schema && !had_records {
        output.info(&format!("Nothing to destroy for '{resource}'"))?;
    } else {
        info!(resource = %resource, "resource destroyed");
    }

    Ok(())
}

/// Remove one record, matching by id first and falling back to an exact
/// `name` field match.
#[instrument(skip_all, fields(resource, key))]
fn destroy_instance(
    resource: &str,
    key: &str,
    global: &GlobalArgs,
    output: &OutputManager,
) -> CliResult<()> {
    let resource = super::parse_resource_name(resource)?;
    let layout = ProjectLayout::new(global.project_root());

    let instances = InstanceStore::new(Box::new(JsonFileStore::new(layout.store_file())));
    let removed = instances
        .remove_by_id_or_name(resource.plural(), key)
        .map_err(CliError::Core)?;

    match removed {
        Some(id) => {
            output.success(&format!("Deleted {} instance {id}", resource.singular()))?;
            Ok(())
        }
        None => Err(CliError::Core(CoreError::Application(
            apigen_core::application::ApplicationError::RecordNotFound {
                resource: resource.plural().to_string(),
                key: key.to_string(),
            },
        ))),
    }
}
