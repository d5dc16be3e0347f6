//! Tests for error reporting and exit codes.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn tachi() -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("tachi");
    cmd.env("NO_COLOR", "1")
        .env_remove("TACHI_OUTPUT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("tachi.yaml");
    fs::write(&path, content).unwrap();
    path
}

const BOGUS_STRATEGY: &str = "\
name: demo
strategy: bogus
azure:
  resource_group: demo-rg
  registry: demoacr
services:
  - name: web
";

#[test]
fn unknown_subcommand_is_a_usage_error() {
    tachi().arg("deploy").assert().code(2);
}

#[test]
fn no_arguments_prints_help_and_fails() {
    tachi()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_config_file_exits_two() {
    tachi()
        .args(["validate", "-c", "does-not-exist.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Configuration file not found"))
        .stderr(predicate::str::contains("does-not-exist.yaml"));
}

#[test]
fn malformed_yaml_exits_two() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "name: demo\nazure: [unclosed\n");

    tachi()
        .args(["validate", "-c"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration file"));
}

#[test]
fn empty_document_exits_two() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");

    tachi()
        .args(["generate", "-c"])
        .arg(&config)
        .arg("-o")
        .arg(temp.path().join("out"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn missing_required_field_names_it() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "name: demo\nstrategy: trunk-direct\n");

    tachi()
        .args(["validate", "-c"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("azure"));
}

#[test]
fn bogus_strategy_fails_validation_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), BOGUS_STRATEGY);
    let out = temp.path().join("out");

    tachi()
        .args(["generate", "-c"])
        .arg(&config)
        .arg("-o")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration is invalid (1 error)"))
        .stderr(predicate::str::contains("bogus"))
        .stderr(predicate::str::contains("trunk-direct"))
        .stderr(predicate::str::contains("trunk-release"))
        .stderr(predicate::str::contains("trunk-release-stage"));

    assert!(!out.exists());
}

#[test]
fn padded_strategy_name_is_rejected() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        &BOGUS_STRATEGY.replace("strategy: bogus", "strategy: \"trunk-direct \""),
    );

    tachi()
        .args(["validate", "-v", "-c"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid strategy: 'trunk-direct '"));
}

#[test]
fn every_validation_error_is_listed() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        "\
name: demo
strategy: trunk-direct
azure:
  resource_group: demo-rg
  registry: demoacr
services:
  - name: web
    port: 70000
    cpu: -1
  - name: web
",
    );

    tachi()
        .args(["validate", "-c"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Duplicate service name: 'web'"))
        .stderr(predicate::str::contains("Service 'web': port must be between 1 and 65535"))
        .stderr(predicate::str::contains("Service 'web': cpu must be greater than 0"));
}

#[test]
fn non_empty_output_is_a_conflict_without_force() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        "\
name: demo
strategy: trunk-direct
azure:
  resource_group: demo-rg
  registry: demoacr
services:
  - name: web
",
    );
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();
    fs::write(out.join("README.md"), "keep me").unwrap();

    tachi()
        .args(["generate", "-c"])
        .arg(&config)
        .arg("-o")
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Output directory is not empty"))
        .stderr(predicate::str::contains("--force"));

    assert!(!out.join(".github").exists());
    assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "keep me");
}

#[test]
fn interactive_mode_needs_a_terminal() {
    let temp = TempDir::new().unwrap();

    tachi()
        .current_dir(temp.path())
        .arg("generate")
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Interactive mode is unavailable"))
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn missing_settings_file_is_reported() {
    tachi()
        .args(["--settings", "/definitely/not/here.toml", "completions", "bash"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load settings"));
}

#[test]
fn debug_flag_shows_cause_chain_without_hint() {
    let temp = TempDir::new().unwrap();
    let dir_as_config = temp.path().join("config-dir");
    fs::create_dir(&dir_as_config).unwrap();

    tachi()
        .args(["-d", "validate", "-c"])
        .arg(&dir_as_config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read configuration file"))
        .stderr(predicate::str::contains("Caused by:"))
        .stderr(predicate::str::contains("Use -d / --debug").not());
}
