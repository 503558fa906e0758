#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_sync_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("epgmerge");
    cmd.args(["sync", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--date"))
        .stdout(predicate::str::contains("--out-dir"));
}

#[test]
fn test_sources_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("epgmerge");
    cmd.args(["sources", "--help"]).assert().success();
}

#[test]
fn test_sync_rejects_malformed_date() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("epgmerge");
    cmd.args(["sync", "--date", "05-01-2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--date"));
}

#[test]
fn test_sync_empty_filter_list_exits_cleanly() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("filter_list.txt"), "").unwrap();
    let out = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("epgmerge");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "sync",
        "--out-dir",
        out.path().to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("No channels in filter list"));
    assert!(!out.path().join("today").exists());
    assert!(!out.path().join("tomorrow").exists());
}

#[test]
fn test_sync_missing_filter_file_exits_cleanly() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("epgmerge");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "sync",
        "--out-dir",
        out.path().to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Filter list not found"));
}

#[test]
fn test_sync_unparsable_config_logs_and_exits_cleanly() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "sources = [ not toml").unwrap();
    std::fs::write(dir.path().join("filter_list.txt"), "star-plus\n").unwrap();
    let out = tempfile::tempdir().unwrap();

    // Act & Assert: the failure is logged, the exit code stays clean
    let mut cmd = cargo_bin_cmd!("epgmerge");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "sync",
        "--out-dir",
        out.path().to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("failed to load config"));
}

#[test]
fn test_sources_lists_defaults() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("epgmerge");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "sources"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jio TV"))
        .stdout(predicate::str::contains("Tata Play"));
}
