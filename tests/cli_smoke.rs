#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the CLI binary starts correctly and
//! responds to basic commands without crashing.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn jobshell() -> Command {
    Command::cargo_bin("jobshell").unwrap()
}

#[test]
fn test_help_displays_usage() {
    jobshell()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Job hunting terminal"))
        .stdout(predicate::str::contains("--source"))
        .stdout(predicate::str::contains("--endpoint"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_version_displays_version() {
    jobshell()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_serve_help() {
    jobshell()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--bind"));
}

#[test]
fn test_invalid_source_rejected() {
    jobshell()
        .args(["--source", "live"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown source mode"));
}

#[test]
fn test_remote_without_endpoint_fails() {
    let config_home = TempDir::new().unwrap();
    jobshell()
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG")
        .args(["serve", "--source", "remote"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("endpoint"));
}

#[test]
fn test_configure_show_reads_config_file() {
    let config_home = TempDir::new().unwrap();
    let dir = config_home.path().join("jobshell");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "[jobshell]\nsource = \"remote\"\nendpoint = \"http://feed.local\"\n",
    )
    .unwrap();

    jobshell()
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current defaults"))
        .stdout(predicate::str::contains("remote"))
        .stdout(predicate::str::contains("http://feed.local"))
        .stdout(predicate::str::contains("(not set)"));
}
