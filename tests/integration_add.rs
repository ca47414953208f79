//! End-to-end tests for `atelier add` against a local registry directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"{
  "style": "default",
  "tailwind": { "config": "tailwind.config.ts", "css": "app/globals.css" },
  "rsc": false,
  "tsx": true,
  "aliases": { "components": "@/components", "utils": "@/lib/utils" }
}
"#;

/// Create a project directory with a package manifest and, optionally, a
/// persisted configuration.
fn project(with_config: bool) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    if with_config {
        fs::write(dir.path().join("atelier.json"), CONFIG).unwrap();
    }
    dir
}

/// Create a local registry directory with one `alert` component.
fn registry() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("components")).unwrap();
    fs::write(
        dir.path().join("index.json"),
        json!([{ "name": "alert", "description": "An alert", "dependencies": [] }]).to_string(),
    )
    .unwrap();
    fs::write(
        dir.path().join("components").join("alert.json"),
        json!({
            "name": "alert",
            "description": "An alert",
            "dependencies": [],
            "files": [{ "name": "alert.tsx", "content": "X" }]
        })
        .to_string(),
    )
    .unwrap();
    dir
}

fn atelier(project_dir: &Path, registry_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("atelier").unwrap();
    cmd.current_dir(project_dir)
        .env("ATELIER_REGISTRY_URL", registry_dir)
        .env("ATELIER_NO_PROGRESS", "1")
        .env_remove("ATELIER_REGISTRY_TOKEN");
    cmd
}

#[test]
fn add_installs_component_and_utils_bootstrap() {
    let project = project(true);
    let registry = registry();

    atelier(project.path(), registry.path())
        .args(["add", "alert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 component(s)"));

    let installed = project.path().join("src/components/ui/alert.tsx");
    assert_eq!(fs::read_to_string(installed).unwrap(), "X");

    let utils = fs::read_to_string(project.path().join("src/lib/utils")).unwrap();
    assert!(utils.contains("export function cn"));
}

#[test]
fn add_auto_detects_when_config_missing() {
    let project = project(false);
    let registry = registry();

    atelier(project.path(), registry.path())
        .args(["add", "alert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Auto-detecting project structure"));

    assert!(project.path().join("src/components/ui/alert.tsx").exists());
    // Auto-detection must not persist anything.
    assert!(!project.path().join("atelier.json").exists());
}

#[test]
fn add_all_installs_everything_in_the_index() {
    let project = project(true);
    let registry = registry();

    atelier(project.path(), registry.path())
        .args(["add", "--all"])
        .assert()
        .success();

    assert!(project.path().join("src/components/ui/alert.tsx").exists());
}

#[test]
fn add_without_arguments_is_a_clean_noop_when_nothing_selected() {
    let project = project(true);
    let registry = registry();

    // stdin is not a TTY, so the selection resolves to nothing.
    atelier(project.path(), registry.path())
        .arg("add")
        .assert()
        .success()
        .stdout(predicate::str::contains("No components selected"));

    assert!(!project.path().join("src/components/ui/alert.tsx").exists());
}

#[test]
fn add_conflict_without_overwrite_keeps_existing_bytes() {
    let project = project(true);
    let registry = registry();

    let ui_dir = project.path().join("src/components/ui");
    fs::create_dir_all(&ui_dir).unwrap();
    fs::write(ui_dir.join("alert.tsx"), "local edits").unwrap();

    // Non-interactive stdin answers the overwrite prompt with its default: no.
    atelier(project.path(), registry.path())
        .args(["add", "alert"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(ui_dir.join("alert.tsx")).unwrap(),
        "local edits"
    );
}

#[test]
fn add_conflict_with_overwrite_flag_replaces_file() {
    let project = project(true);
    let registry = registry();

    let ui_dir = project.path().join("src/components/ui");
    fs::create_dir_all(&ui_dir).unwrap();
    fs::write(ui_dir.join("alert.tsx"), "local edits").unwrap();

    atelier(project.path(), registry.path())
        .args(["add", "alert", "--overwrite"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(ui_dir.join("alert.tsx")).unwrap(), "X");
}

#[test]
fn add_respects_custom_alias_base() {
    let project = project(false);
    let registry = registry();

    // A compiler config mapping @/* to ./app/* moves the install target.
    fs::write(
        project.path().join("tsconfig.json"),
        json!({ "compilerOptions": { "paths": { "@/*": ["./app/*"] } } }).to_string(),
    )
    .unwrap();

    atelier(project.path(), registry.path())
        .args(["add", "alert"])
        .assert()
        .success();

    assert!(
        project
            .path()
            .join("src/app/components/ui/alert.tsx")
            .exists()
    );
}

#[test]
fn add_outside_a_project_fails_with_guidance() {
    let project = TempDir::new().unwrap(); // no package.json
    let registry = registry();

    atelier(project.path(), registry.path())
        .args(["add", "alert"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("package.json"));
}
