//! Configuration integration tests.
//!
//! These run the compiled binary with `info --json` and assert the
//! effective configuration it reports.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &std::path::Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .env("TEXTMETRICS_LOG_DIR", dir.join(".logs"))
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert_eq!(json["config"]["autosave"], true);
    assert_eq!(json["config"]["autosave_delay_ms"], 1000);
    assert_eq!(json["config"]["max_input_bytes"], 5 * 1024 * 1024);
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textmetrics.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "debug");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with(".textmetrics.toml"),
        "should report dotfile: {reported}"
    );
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("nested").join("deep");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(tmp.path().join(".textmetrics.toml"), "theme = \"dark\"").unwrap();

    let json = info_json(&sub_dir);
    assert_eq!(json["config"]["theme"], "dark");
}

#[test]
fn regular_name_overrides_dotfile() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textmetrics.toml"), "autosave_delay_ms = 250").unwrap();
    fs::write(tmp.path().join("textmetrics.toml"), "autosave_delay_ms = 4000").unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["autosave_delay_ms"], 4000);
}

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(tmp.path().join(".textmetrics.toml"), "autosave = false").unwrap();

    let json = info_json(&src);
    assert_eq!(
        json["config"]["autosave"], true,
        "config above the repository root must not be found"
    );
}

// =============================================================================
// Config Formats and Fields
// =============================================================================

#[test]
fn parses_yaml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".textmetrics.yaml"),
        "autosave: false\ndraft_file: notes/draft.txt\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["autosave"], false);
    assert_eq!(json["config"]["draft_file"], "notes/draft.txt");
}

#[test]
fn parses_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".textmetrics.json"),
        r#"{"max_input_bytes": 2048}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["max_input_bytes"], 2048);
}

#[test]
fn disabled_input_limit_is_not_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".textmetrics.toml"),
        "disable_input_limit = true",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert!(json["config"]["max_input_bytes"].is_null());
}

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textmetrics.toml"), "theme = \"light\"").unwrap();
    let explicit = tmp.path().join("custom.toml");
    fs::write(&explicit, "theme = \"dark\"").unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .env("TEXTMETRICS_LOG_DIR", tmp.path().join(".logs"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["theme"], "dark");
}

#[test]
fn env_var_overrides_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textmetrics.toml"), "theme = \"light\"").unwrap();

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .env("TEXTMETRICS_THEME", "dark")
        .env("TEXTMETRICS_LOG_DIR", tmp.path().join(".logs"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["theme"], "dark");
}

// =============================================================================
// Invalid Config
// =============================================================================

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textmetrics.toml"), "autosave = [not valid").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .env("TEXTMETRICS_LOG_DIR", tmp.path().join(".logs"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn invalid_theme_value_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textmetrics.toml"), "theme = \"sepia\"").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .env("TEXTMETRICS_LOG_DIR", tmp.path().join(".logs"))
        .assert()
        .failure();
}
