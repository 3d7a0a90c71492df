//! End-to-end tests driving the compiled `apigen` binary.
//!
//! Every test gets its own temporary project root via `--root`, so tests are
//! independent and leave nothing behind.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn apigen(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("apigen").unwrap();
    cmd.arg("--root").arg(root.path()).arg("--no-color");
    cmd
}

fn read_json(root: &TempDir, rel: &str) -> Value {
    let text = std::fs::read_to_string(root.path().join(rel)).unwrap();
    serde_json::from_str(&text).unwrap()
}

// ── resource ──────────────────────────────────────────────────────────────────

#[test]
fn resource_creates_schema_and_artifacts() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["resource", "widget", "name:string", "count:number"])
        .assert()
        .success()
        .stdout(predicate::str::contains("models/widget.js"));

    for rel in [
        "src/models/widget.js",
        "src/controllers/widgetsController.js",
        "src/routes/widgets.js",
        "src/services/dataService.js",
    ] {
        assert!(root.path().join(rel).exists(), "missing {rel}");
    }

    let schema = read_json(&root, "src/data/data_schema.json");
    assert_eq!(schema["widgets"]["id"], "string");
    assert_eq!(schema["widgets"]["name"], "string");
    assert_eq!(schema["widgets"]["count"], "number");
}

#[test]
fn resource_rerun_is_idempotent() {
    let root = TempDir::new().unwrap();

    apigen(&root).args(["resource", "widget"]).assert().success();

    // manual edit survives a rerun
    let model = root.path().join("src/models/widget.js");
    std::fs::write(&model, "// edited\n").unwrap();
    let schema_path = root.path().join("src/data/data_schema.json");
    let schema_before = std::fs::read_to_string(&schema_path).unwrap();

    apigen(&root)
        .args(["resource", "widget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped"));
    assert_eq!(std::fs::read_to_string(&model).unwrap(), "// edited\n");
    assert_eq!(
        std::fs::read_to_string(&schema_path).unwrap(),
        schema_before,
        "rerun must not rewrite the schema file"
    );
}

#[test]
fn resource_force_merges_schema_and_backs_up() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["resource", "widget", "name:string"])
        .assert()
        .success();
    apigen(&root)
        .args(["resource", "widget", "color:string", "--force"])
        .assert()
        .success();

    let schema = read_json(&root, "src/data/data_schema.json");
    assert_eq!(schema["widgets"]["name"], "string");
    assert_eq!(schema["widgets"]["color"], "string");

    let backup = read_json(&root, "src/backups/schema_backup.json");
    assert!(
        backup["widgets"].get("color").is_none(),
        "backup holds the pre-merge schema"
    );
}

#[test]
fn resource_only_restricts_generation() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["resource", "widget", "--only", "model"])
        .assert()
        .success();

    assert!(root.path().join("src/models/widget.js").exists());
    assert!(!root.path().join("src/routes/widgets.js").exists());
}

#[test]
fn invalid_resource_name_is_a_user_error() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["resource", ".hidden"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid resource name"));
}

#[test]
fn init_server_writes_server_and_manifest() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["resource", "widget", "--init-server"])
        .assert()
        .success();

    let server = std::fs::read_to_string(root.path().join("src/server.js")).unwrap();
    assert!(server.contains("app.listen("));

    let manifest = read_json(&root, "package.json");
    assert_eq!(manifest["type"], "module");
    assert_eq!(manifest["scripts"]["start"], "node src/server.js");
    assert!(manifest["dependencies"]["express"].is_string());
}

// ── new ───────────────────────────────────────────────────────────────────────

#[test]
fn new_creates_record_with_typed_values_and_defaults() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["resource", "widget", "name:string", "count:number", "active:boolean"])
        .assert()
        .success();
    apigen(&root)
        .args(["new", "widget", "name:Gizmo", "count:3"])
        .assert()
        .success();

    let store = read_json(&root, "src/data/data_store.json");
    let record = &store["widgets"][0];
    assert_eq!(record["name"], "Gizmo");
    assert_eq!(record["count"], 3.0);
    assert_eq!(record["active"], false, "boolean default applies");
    assert!(record["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(record["created_at"].is_string());
}

#[test]
fn new_infers_schema_for_unknown_resource() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["new", "gadget", "name:Sprocket", "active:true"])
        .assert()
        .success();

    let schema = read_json(&root, "src/data/data_schema.json");
    assert_eq!(schema["gadgets"]["id"], "string");
    assert_eq!(schema["gadgets"]["active"], "boolean");
    assert!(root.path().join("src/models/gadget.js").exists());
}

#[test]
fn new_with_init_server_bootstraps_the_project() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["new", "widget", "name:Gizmo", "--init-server"])
        .assert()
        .success();

    let server = std::fs::read_to_string(root.path().join("src/server.js")).unwrap();
    assert!(server.contains("app.listen("));
    let manifest = read_json(&root, "package.json");
    assert_eq!(manifest["scripts"]["start"], "node src/server.js");

    let store = read_json(&root, "src/data/data_store.json");
    assert_eq!(store["widgets"][0]["name"], "Gizmo");
}

#[test]
fn new_without_pairs_is_a_user_error() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["new", "widget"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No field values"));
}

#[test]
fn quoted_values_survive_intact() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["new", "sauce", "name:Worcestershire Sauce", "origin:\"England\""])
        .assert()
        .success();

    let store = read_json(&root, "src/data/data_store.json");
    assert_eq!(store["sauces"][0]["name"], "Worcestershire Sauce");
    assert_eq!(store["sauces"][0]["origin"], "England");
}

// ── route ─────────────────────────────────────────────────────────────────────

#[test]
fn route_injects_before_listen_marker() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["resource", "books", "--init-server"])
        .assert()
        .success();
    apigen(&root)
        .args(["route", "books", "get", "id"])
        .assert()
        .success();

    let server = std::fs::read_to_string(root.path().join("src/server.js")).unwrap();
    let route_pos = server.find("app.get('/books/:id'").expect("route injected");
    let listen_pos = server.find("app.listen(").unwrap();
    assert!(route_pos < listen_pos);
    assert!(root.path().join("src/server.backup.js").exists());
}

#[test]
fn route_rejects_unsupported_method_before_io() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["route", "books", "patch"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("patch"));

    assert!(
        !root.path().join("src/server.backup.js").exists(),
        "no file is touched for a bad method"
    );
}

#[test]
fn route_without_server_file_is_not_found() {
    let root = TempDir::new().unwrap();

    apigen(&root).args(["route", "books", "get"]).assert().code(3);
}

// ── destroy ───────────────────────────────────────────────────────────────────

#[test]
fn destroy_resource_removes_files_schema_and_records() {
    let root = TempDir::new().unwrap();

    apigen(&root).args(["resource", "widget"]).assert().success();
    apigen(&root)
        .args(["new", "widget", "name:Gizmo"])
        .assert()
        .success();

    apigen(&root)
        .args(["destroy", "resource", "widget"])
        .assert()
        .success();

    assert!(!root.path().join("src/models/widget.js").exists());
    assert!(!root.path().join("src/routes/widgets.js").exists());

    let schema = read_json(&root, "src/data/data_schema.json");
    assert!(schema.get("widgets").is_none());
    let store = read_json(&root, "src/data/data_store.json");
    assert!(store.get("widgets").is_none());
}

#[test]
fn destroy_instance_by_name_fallback() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["new", "widget", "name:Gizmo"])
        .assert()
        .success();
    apigen(&root)
        .args(["destroy", "instance", "widget", "Gizmo"])
        .assert()
        .success();

    let store = read_json(&root, "src/data/data_store.json");
    assert_eq!(store["widgets"].as_array().map(Vec::len), Some(0));
}

#[test]
fn destroy_missing_instance_exits_not_found() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["destroy", "instance", "widget", "no-such-key"])
        .assert()
        .code(3);
}

// ── completions / misc ────────────────────────────────────────────────────────

#[test]
fn completions_emit_script() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apigen"));
}

#[test]
fn quiet_suppresses_success_output() {
    let root = TempDir::new().unwrap();

    apigen(&root)
        .args(["--quiet", "resource", "widget"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
