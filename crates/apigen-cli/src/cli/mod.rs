//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use apigen_core::domain::ArtifactKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "apigen",
    bin_name = "apigen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Express CRUD resource scaffolding",
    long_about = "Apigen generates Express model/controller/route boilerplate \
                  and maintains a flat-file JSON schema and data store.",
    after_help = "EXAMPLES:\n\
        \x20 apigen resource widget name:string color:string\n\
        \x20 apigen resource widget --init-server\n\
        \x20 apigen new widget name:Gizmo color:red\n\
        \x20 apigen route books get id\n\
        \x20 apigen destroy resource widget\n\
        \x20 apigen completions bash > /usr/share/bash-completion/completions/apigen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Define a resource schema and generate its artifacts.
    #[command(
        visible_alias = "r",
        about = "Define a resource and generate model/controller/route",
        after_help = "EXAMPLES:\n\
            \x20 apigen resource widget                      # id + name fields\n\
            \x20 apigen resource widget name:string count:number\n\
            \x20 apigen resource widget color:string --force # merge into schema\n\
            \x20 apigen resource widget size:number --reset  # replace schema\n\
            \x20 apigen resource widget --only controller"
    )]
    Resource(ResourceArgs),

    /// Create a data record for an existing (or inferred) resource.
    #[command(
        visible_alias = "n",
        about = "Create a resource instance in the data store",
        after_help = "EXAMPLES:\n\
            \x20 apigen new widget name:Gizmo color:red\n\
            \x20 apigen new widget name:\"Left Handle\" count:3 active:true\n\
            \x20 apigen new widget name:Gizmo --init-server"
    )]
    New(NewArgs),

    /// Inject a method-specific route into the server module.
    #[command(
        about = "Add a single route handler to src/server.js",
        after_help = "EXAMPLES:\n\
            \x20 apigen route books get        # GET /books (collection)\n\
            \x20 apigen route books get id     # GET /books/:id\n\
            \x20 apigen route books post\n\
            \x20 apigen route books delete id"
    )]
    Route(RouteArgs),

    /// Remove a resource or a single instance.
    #[command(
        visible_alias = "d",
        about = "Destroy a resource or an instance",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 apigen destroy resource widget\n\
            \x20 apigen destroy instance widget 3f1a…\n\
            \x20 apigen destroy instance widget Gizmo   # falls back to name match"
    )]
    Destroy(DestroyCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 apigen completions bash > ~/.local/share/bash-completion/completions/apigen\n\
            \x20 apigen completions zsh  > ~/.zfunc/_apigen\n\
            \x20 apigen completions fish > ~/.config/fish/completions/apigen.fish"
    )]
    Completions(CompletionsArgs),
}

// ── resource ──────────────────────────────────────────────────────────────────

/// Arguments for `apigen resource`.
#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// Resource name, singular or plural.
    #[arg(value_name = "NAME", help = "Resource name (widget or widgets)")]
    pub name: String,

    /// Field definitions as `name:type` tokens (`type` defaults to string).
    #[arg(
        value_name = "FIELD",
        help = "Field definitions, e.g. name:string count:number active:boolean"
    )]
    pub fields: Vec<String>,

    /// Merge the given fields into an existing schema and regenerate
    /// artifacts that already exist on disk.
    #[arg(
        long = "force",
        help = "Merge fields into an existing schema and rewrite artifacts"
    )]
    pub force: bool,

    /// Replace an existing schema entirely. Implies regeneration.
    #[arg(
        long = "reset",
        help = "Replace the existing schema (wins over --force)"
    )]
    pub reset: bool,

    /// Restrict generation to one artifact kind.
    #[arg(
        long = "only",
        value_enum,
        value_name = "KIND",
        help = "Generate only one artifact kind"
    )]
    pub only: Option<OnlyArtifact>,

    /// Also scaffold the standalone server and patch package.json.
    #[arg(long = "init-server", help = "Scaffold src/server.js and patch package.json")]
    pub init_server: bool,
}

/// Artifact selector for `--only`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OnlyArtifact {
    Model,
    Controller,
    Route,
}

impl From<OnlyArtifact> for ArtifactKind {
    fn from(only: OnlyArtifact) -> Self {
        match only {
            OnlyArtifact::Model => ArtifactKind::Model,
            OnlyArtifact::Controller => ArtifactKind::Controller,
            OnlyArtifact::Route => ArtifactKind::Route,
        }
    }
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `apigen new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Resource the instance belongs to.
    #[arg(value_name = "RESOURCE", help = "Resource name")]
    pub resource: String,

    /// Field values as `key:value` tokens.
    #[arg(
        value_name = "KEY:VALUE",
        help = "Field values, e.g. name:Gizmo count:3 active:true"
    )]
    pub values: Vec<String>,

    /// Skip the created/updated timestamps on the new record.
    #[arg(long = "no-timestamps", help = "Omit created_at/updated_at stamps")]
    pub no_timestamps: bool,

    /// Also scaffold the standalone server and patch package.json.
    #[arg(long = "init-server", help = "Scaffold src/server.js and patch package.json")]
    pub init_server: bool,
}

// ── route ─────────────────────────────────────────────────────────────────────

/// Arguments for `apigen route`.
#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Resource path segment (used verbatim in the URL).
    #[arg(value_name = "RESOURCE", help = "Resource path segment")]
    pub resource: String,

    /// HTTP method: get, post, put, or delete.
    #[arg(value_name = "METHOD", help = "HTTP method (get, post, put, delete)")]
    pub method: String,

    /// Optional path parameter name (e.g. `id`).
    #[arg(value_name = "PARAM", help = "Path parameter name")]
    pub param: Option<String>,
}

// ── destroy ───────────────────────────────────────────────────────────────────

/// Subcommands for `apigen destroy`.
#[derive(Debug, Subcommand)]
pub enum DestroyCommands {
    /// Remove a resource: artifact files, schema entry, and all records.
    Resource {
        /// Resource name, singular or plural.
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Remove a single record by id, falling back to an exact name match.
    Instance {
        /// Resource the record belongs to.
        #[arg(value_name = "RESOURCE")]
        resource: String,
        /// Record id, or a value to match against the `name` field.
        #[arg(value_name = "ID_OR_NAME")]
        key: String,
    },
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `apigen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_resource_command() {
        let cli = Cli::parse_from([
            "apigen",
            "resource",
            "widget",
            "name:string",
            "count:number",
        ]);
        if let Commands::Resource(args) = cli.command {
            assert_eq!(args.name, "widget");
            assert_eq!(args.fields, vec!["name:string", "count:number"]);
            assert!(!args.force && !args.reset);
        } else {
            panic!("expected Resource command");
        }
    }

    #[test]
    fn parse_new_command_with_values() {
        let cli = Cli::parse_from(["apigen", "new", "widget", "name:Gizmo", "count:3"]);
        if let Commands::New(args) = cli.command {
            assert_eq!(args.resource, "widget");
            assert_eq!(args.values.len(), 2);
        } else {
            panic!("expected New command");
        }
    }

    #[test]
    fn parse_route_with_param() {
        let cli = Cli::parse_from(["apigen", "route", "books", "get", "id"]);
        if let Commands::Route(args) = cli.command {
            assert_eq!(args.resource, "books");
            assert_eq!(args.method, "get");
            assert_eq!(args.param.as_deref(), Some("id"));
        } else {
            panic!("expected Route command");
        }
    }

    #[test]
    fn parse_destroy_instance() {
        let cli = Cli::parse_from(["apigen", "destroy", "instance", "widget", "Gizmo"]);
        assert!(matches!(
            cli.command,
            Commands::Destroy(DestroyCommands::Instance { .. })
        ));
    }

    #[test]
    fn only_selector_maps_to_artifact_kind() {
        assert_eq!(ArtifactKind::from(OnlyArtifact::Model), ArtifactKind::Model);
        assert_eq!(
            ArtifactKind::from(OnlyArtifact::Controller),
            ArtifactKind::Controller
        );
        assert_eq!(ArtifactKind::from(OnlyArtifact::Route), ArtifactKind::Route);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["apigen", "--quiet", "--verbose", "resource", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn root_flag_is_global() {
        let cli = Cli::parse_from(["apigen", "resource", "widget", "--root", "/tmp/proj"]);
        assert_eq!(
            cli.global.project_root(),
            std::path::PathBuf::from("/tmp/proj")
        );
    }
}
