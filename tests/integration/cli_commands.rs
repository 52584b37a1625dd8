//! Running the `statescope` binary end to end

use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

use crate::integration::{write_fixture, APP_JSON, EDITOR_JSON};

struct Fixture {
    dir: TempDir,
    app: PathBuf,
    editor: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("xdg")).unwrap();
        std::fs::create_dir_all(dir.path().join("home")).unwrap();
        let app = write_fixture(dir.path(), "app.json", APP_JSON);
        let editor = write_fixture(dir.path(), "editor.json", EDITOR_JSON);
        Self { dir, app, editor }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_statescope"))
            .env("HOME", self.dir.path().join("home"))
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env_remove("STATESCOPE_ENV")
            .arg("--workspace")
            .arg(self.dir.path())
            .arg("--quiet")
            .args(args)
            .output()
            .unwrap()
    }

    fn inputs(&self) -> Vec<String> {
        vec![
            "--app".to_string(),
            self.app.to_string_lossy().into_owned(),
            "--editor".to_string(),
            self.editor.to_string_lossy().into_owned(),
        ]
    }

    fn run_with_inputs(&self, command: &str, extra: &[&str]) -> Output {
        let inputs = self.inputs();
        let mut args: Vec<&str> = vec![command];
        args.extend(inputs.iter().map(String::as_str));
        args.extend_from_slice(extra);
        self.run(&args)
    }
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_targets_json_lists_groups_and_active() {
    let fixture = Fixture::new();
    let listing = stdout_json(&fixture.run_with_inputs("targets", &["--format", "json"]));

    assert_eq!(listing["activeTarget"], json!("widget:nameInput"));
    assert_eq!(listing["targetsByGroup"]["globals"].as_array().unwrap().len(), 6);
    assert_eq!(
        listing["targetsByGroup"]["queries"],
        json!([{"id": "query:q1", "label": "Users"}])
    );
    assert_eq!(listing["targetsByGroup"]["widgets"].as_array().unwrap().len(), 5);
}

#[test]
fn test_targets_text_marks_active_row() {
    let fixture = Fixture::new();
    let output = fixture.run_with_inputs("targets", &[]);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("widget:nameInput"));
    assert!(text.contains("14 targets, active: widget:nameInput"));
}

#[test]
fn test_inspect_named_query_as_json() {
    let fixture = Fixture::new();
    let target = stdout_json(
        &fixture.run_with_inputs("inspect", &["--target", "query:q1", "--format", "json"]),
    );
    assert_eq!(target["id"], json!("query:q1"));
    assert_eq!(target["group"], json!("queries"));
    let state = &target["state"];
    assert_eq!(state["name"], json!("Users"));
    assert_eq!(state["status"], json!("success"));
    assert_eq!(state["data"], json!([{"name": "Grace"}]));
}

#[test]
fn test_search_without_match_says_so() {
    let fixture = Fixture::new();
    let output = fixture.run_with_inputs("search", &["--query", "zzz"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No matches for \"zzz\""));
}

#[test]
fn test_search_named_target() {
    let fixture = Fixture::new();
    let filtered = stdout_json(
        &fixture.run_with_inputs("search", &["--query", "ada@", "--target", "global:currentUser"]),
    );
    assert_eq!(filtered, json!({"email": "ada@example.com"}));
}

#[test]
fn test_context_prints_json() {
    let fixture = Fixture::new();
    let context = stdout_json(&fixture.run_with_inputs("context", &[]));
    assert_eq!(context["Users"], context["q1"]);
    assert_eq!(context["viewport"], json!({"width": 1280, "height": 720}));
    assert_eq!(context["app"]["environment"], json!("production"));
}

#[test]
fn test_unknown_target_fails() {
    let fixture = Fixture::new();
    let output = fixture.run_with_inputs("inspect", &["--target", "widget:missing"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Target not found: widget:missing"));
}

#[test]
fn test_missing_app_document_fails() {
    let fixture = Fixture::new();
    let missing = fixture.dir.path().join("absent.json");
    let output = fixture.run(&["targets", "--app", missing.to_str().unwrap()]);
    assert!(!output.status.success());
}
