//! Standalone server bootstrap.
//!
//! `--init-server` writes `src/server.js` (once) and patches `package.json`
//! so the generated project runs with `npm start`.  Patching is additive:
//! existing scripts, dependencies, and a declared `"type"` are never
//! overwritten; `"type": "module"` is only filled in when absent, since the
//! generated files are ESM.

use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use apigen_core::{
    application::ports::{ArtifactRenderer, Filesystem},
    domain::ProjectLayout,
};

use crate::{
    error::{CliError, CliResult},
    output::OutputManager,
};

const EXPRESS_VERSION: &str = "^5.1.0";
const FAST_GLOB_VERSION: &str = "^3.3.3";
const START_SCRIPT: &str = "node src/server.js";

/// Write the server module if missing and bring `package.json` up to date.
#[instrument(skip_all)]
pub fn ensure_server(
    filesystem: &dyn Filesystem,
    renderer: &dyn ArtifactRenderer,
    layout: &ProjectLayout,
    out: &OutputManager,
) -> CliResult<()> {
    let server_path = layout.server_file();
    if filesystem.exists(&server_path) {
        out.info(&format!("{} already exists", server_path.display()))?;
    } else {
        if let Some(parent) = server_path.parent() {
            filesystem.create_dir_all(parent)?;
        }
        filesystem.write_file(&server_path, &renderer.server_module())?;
        info!(path = %server_path.display(), "server module written");
        out.success(&format!("Created {}", server_path.display()))?;
    }

    patch_manifest(filesystem, layout, out)
}

/// Create or patch `package.json` in the project root.
fn patch_manifest(
    filesystem: &dyn Filesystem,
    layout: &ProjectLayout,
    out: &OutputManager,
) -> CliResult<()> {
    let manifest_path = layout.manifest_file();

    let mut manifest: Map<String, Value> = if filesystem.exists(&manifest_path) {
        let text = filesystem.read_to_string(&manifest_path)?;
        serde_json::from_str(&text).map_err(|e| CliError::InvalidInput {
            message: format!("{} is not valid JSON: {e}", manifest_path.display()),
            source: Some(Box::new(e)),
        })?
    } else {
        let name = layout
            .root()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app");
        out.info("Creating package.json")?;
        json!({
            "name": name,
            "version": "1.0.0",
            "private": true,
        })
        .as_object()
        .cloned()
        .unwrap_or_default()
    };

    let mut changed = !filesystem.exists(&manifest_path);

    // Generated sources use import/export. A declared non-module "type" is
    // the user's call; warn and leave it alone.
    match manifest.get("type").and_then(Value::as_str) {
        Some("module") => {}
        Some(other) => {
            out.warning(&format!(
                "package.json declares \"type\": \"{other}\"; generated files are ESM \
                 and will not load until you set \"type\": \"module\""
            ))?;
        }
        None => {
            manifest.insert("type".into(), Value::String("module".into()));
            changed = true;
        }
    }

    let scripts = entry_object(&mut manifest, "scripts");
    if !scripts.contains_key("start") {
        scripts.insert("start".into(), Value::String(START_SCRIPT.into()));
        changed = true;
    }

    let deps = entry_object(&mut manifest, "dependencies");
    for (name, version) in [("express", EXPRESS_VERSION), ("fast-glob", FAST_GLOB_VERSION)] {
        if !deps.contains_key(name) {
            deps.insert(name.into(), Value::String(version.into()));
            changed = true;
        }
    }

    if changed {
        let text = serde_json::to_string_pretty(&Value::Object(manifest))
            .map_err(|e| CliError::InvalidInput {
                message: format!("failed to serialise package.json: {e}"),
                source: Some(Box::new(e)),
            })?;
        filesystem.write_file(&manifest_path, &format!("{text}\n"))?;
        info!(path = %manifest_path.display(), "manifest updated");
        out.success(&format!("Updated {}", manifest_path.display()))?;
    } else {
        out.info("package.json already up to date")?;
    }

    Ok(())
}

/// Fetch-or-create a nested object entry, replacing non-object values.
fn entry_object<'a>(manifest: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    if !manifest.get(key).is_some_and(Value::is_object) {
        manifest.insert(key.to_string(), Value::Object(Map::new()));
    }
    manifest
        .get_mut(key)
        .and_then(Value::as_object_mut)
        .unwrap_or_else(|| unreachable!("entry inserted above"))
}

// ── tests ─────────────────────────────────────────────────────────────────────
