//! Implementation of the `apigen resource` command.
//!
//! Responsibility: translate CLI arguments into schema + scaffold service
//! calls and display results.  No business logic lives here.

use tracing::{debug, info, instrument};

use apigen_adapters::{ExpressTemplates, FileSnapshotStore, JsonFileStore, LocalFilesystem};
use apigen_core::{
    application::{
        ArtifactOutcome, ScaffoldOptions, ScaffoldService, SchemaMode, SchemaOutcome,
        SchemaRegistry,
    },
    domain::{ProjectLayout, parse_field_defs},
};

use crate::{
    bootstrap,
    cli::{ResourceArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `apigen resource` command.
///
/// Dispatch sequence:
/// 1. Validate the resource name and field definitions
/// 2. Define or update the schema entry (backup before destructive modes)
/// 3. Generate the missing artifacts
/// 4. Optionally bootstrap the standalone server
#[instrument(skip_all, fields(resource = %args.name))]
pub fn execute(
    args: ResourceArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Validate inputs before touching any file.
    let resource = super::parse_resource_name(&args.name)?;

    let tokens = if args.fields.is_empty() {
        debug!("no fields given, using configured defaults");
        config.defaults.fields.clone()
    } else {
        args.fields.clone()
    };
    let defs = parse_field_defs(&tokens).map_err(|e| CliError::Core(e.into()))?;

    let mode = if args.reset {
        SchemaMode::Reset
    } else if args.force {
        SchemaMode::ForceMerge
    } else {
        SchemaMode::CreateIfAbsent
    };

    let layout = ProjectLayout::new(global.project_root());

    // 2. Schema entry.
    let registry = SchemaRegistry::new(
        Box::new(JsonFileStore::new(layout.schema_file())),
        Box::new(FileSnapshotStore::new(layout.schema_backup_file())),
    );
    let (fields, outcome) = registry
        .define_or_extend(resource.plural(), &defs, mode)
        .map_err(CliError::Core)?;

    match outcome {
        SchemaOutcome::Created => {
            output.success(&format!("Schema for '{resource}' created"))?;
        }
        SchemaOutcome::Merged => {
            output.success(&format!("Schema for '{resource}' extended"))?;
            output.info(&format!(
                "Previous schema backed up to {}",
                layout.schema_backup_file().display()
            ))?;
        }
        SchemaOutcome::Reset => {
            output.success(&format!("Schema for '{resource}' reset"))?;
            output.info(&format!(
                "Previous schema backed up to {}",
                layout.schema_backup_file().display()
            ))?;
        }
        SchemaOutcome::Unchanged => {
            output.info(&format!(
                "Schema for '{resource}' already exists (use --force to merge)"
            ))?;
        }
    }

    // 3. Artifacts.
    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ExpressTemplates::new()),
        layout.clone(),
    );
    let opts = ScaffoldOptions {
        only: args.only.map(Into::into),
        force: args.force || args.reset,
    };

    info!(resource = %resource, "scaffold started");
    let reports = service
        .scaffold(&resource, &fields, &opts)
        .map_err(CliError::Core)?;

    for report in &reports {
        match report.outcome {
            ArtifactOutcome::Created => {
                output.success(&format!("Created {}", report.path.display()))?;
            }
            ArtifactOutcome::Overwritten => {
                output.success(&format!("Rewrote {}", report.path.display()))?;
            }
            ArtifactOutcome::Skipped => {
                output.info(&format!(
                    "Skipped {} (exists, use --force to rewrite)",
                    report.path.display()
                ))?;
            }
        }
    }

    // 4. Server bootstrap.
    if args.init_server {
        bootstrap::ensure_server(
            &LocalFilesystem::new(),
            &ExpressTemplates::new(),
            &layout,
            &output,
        )?;
    }

    if !global.quiet {
        let field_list = fields
            .iter()
            .map(|(name, ty)| format!("{name}:{ty}"))
            .collect::<Vec<_>>()
            .join(" ");
        output.print("")?;
        output.print(&format!("Fields: {field_list}"))?;
    }

    Ok(())
}
