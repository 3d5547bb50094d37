//! CLI integration tests for the scan binary.
//!
//! Every command runs in a scratch directory with credential variables
//! scrubbed, so the outcome only depends on what the test sets up.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CREDENTIAL_VARS: &[&str] = &[
    "MY_PAT",
    "GITHUB_TOKEN",
    "REPO_OWNER",
    "REPO_NAME",
    "GITHUB_REPOSITORY",
    "GITHUB_REPOSITORY_OWNER",
];

fn polyradar(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("polyradar");
    cmd.current_dir(dir.path());
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_shows_usage() {
    let dir = TempDir::new().unwrap();
    polyradar(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("polyradar"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn version_prints_the_package_version() {
    let dir = TempDir::new().unwrap();
    polyradar(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("polyradar"));
}

#[test]
fn missing_credentials_fail_fast() {
    let dir = TempDir::new().unwrap();
    polyradar(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("github.token"));
}

#[test]
fn dry_run_still_requires_credentials() {
    // The blacklist fetch is authenticated even when nothing is published.
    let dir = TempDir::new().unwrap();
    polyradar(&dir)
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("github.token"));
}

#[test]
fn malformed_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[scan\nevents_limit = ]").unwrap();

    polyradar(&dir)
        .args(["--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn mistyped_config_value_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[scan]\nevents_limit = \"many\"\n").unwrap();

    polyradar(&dir)
        .args(["--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
