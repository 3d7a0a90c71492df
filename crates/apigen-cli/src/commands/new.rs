//! Implementation of the `apigen new` command.
//!
//! Creates one record in the data store, inferring a schema from the supplied
//! values when the resource has never been defined.  Missing artifacts are
//! scaffolded on the way so a `new` on a fresh project leaves it runnable.

use tracing::{debug, instrument};

use apigen_adapters::{ExpressTemplates, FileSnapshotStore, JsonFileStore, LocalFilesystem};
use apigen_core::{
    application::{InstanceStore, ScaffoldOptions, ScaffoldService, SchemaRegistry},
    domain::{ProjectLayout, parse_kv_args},
};

use crate::{
    bootstrap,
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `apigen new` command.
#[instrument(skip_all, fields(resource = %args.resource))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let resource = super::parse_resource_name(&args.resource)?;

    let values = parse_kv_args(&args.values);
    if values.is_empty() {
        return Err(CliError::MissingPairs {
            resource: resource.singular().to_string(),
        });
    }
    debug!(pairs = values.len(), "values parsed");

    let layout = ProjectLayout::new(global.project_root());

    // Schema: use the existing entry, or infer one from the given values.
    let registry = SchemaRegistry::new(
        Box::new(JsonFileStore::new(layout.schema_file())),
        Box::new(FileSnapshotStore::new(layout.schema_backup_file())),
    );
    let had_schema = registry
        .get(resource.plural())
        .map_err(CliError::Core)?
        .is_some();
    let fields = registry
        .ensure_from_values(resource.plural(), &values)
        .map_err(CliError::Core)?;
    if !had_schema {
        output.info(&format!(
            "Schema for '{resource}' inferred from the given values"
        ))?;
    }

    // Artifacts: fill in whatever is missing, never overwrite.
    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ExpressTemplates::new()),
        layout.clone(),
    );
    let reports = service
        .scaffold(&resource, &fields, &ScaffoldOptions::default())
        .map_err(CliError::Core)?;
    for report in reports
        .iter()
        .filter(|r| r.outcome != apigen_core::application::ArtifactOutcome::Skipped)
    {
        output.success(&format!("Created {}", report.path.display()))?;
    }

    // Server bootstrap, when asked for.
    if args.init_server {
        bootstrap::ensure_server(
            &LocalFilesystem::new(),
            &ExpressTemplates::new(),
            &layout,
            &output,
        )?;
    }

    // Record.
    let timestamps = config.defaults.timestamps && !args.no_timestamps;
    let instances = InstanceStore::new(Box::new(JsonFileStore::new(layout.store_file())))
        .with_timestamps(timestamps);
    let record = instances
        .create(resource.plural(), &fields, &values)
        .map_err(CliError::Core)?;

    output.success(&format!(
        "Created {} instance {}",
        resource.singular(),
        record
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    ))?;

    if !global.quiet {
        let pretty = serde_json::to_string_pretty(&record).map_err(|e| CliError::InvalidInput {
            message: format!("failed to render record: {e}"),
            source: Some(Box::new(e)),
        })?;
        output.print(&pretty)?;
    }

    Ok(())
}
