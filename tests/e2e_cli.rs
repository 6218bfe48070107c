//! CLI end-to-end tests for the folio binary.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[allow(deprecated)]
fn folio_cmd() -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env_remove("DB_PATH").env_remove("DB_NAME");
    cmd
}

#[test]
fn no_args_shows_help() {
    folio_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_prints_package_version() {
    folio_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn validate_reports_warnings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("folio.json");
    std::fs::write(
        &path,
        r#"{"server": {"port": 0}, "storage": {"backend": "memory"}}"#,
    )
    .unwrap();

    folio_cmd()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"))
        .stdout(predicate::str::contains("server.port is 0"));
}

#[test]
fn validate_rejects_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    folio_cmd()
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn create_user_and_add_image() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("cli.db");

    folio_cmd()
        .env("DB_PATH", &db)
        .args(["create-user", "admin", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created user admin"));

    folio_cmd()
        .env("DB_PATH", &db)
        .args(["create-user", "admin", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    folio_cmd()
        .env("DB_PATH", &db)
        .args([
            "add-image",
            "--url",
            "https://cdn.test/a.jpg",
            "--type",
            "column1",
            "--page",
            "work",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"column1\""));
}

#[test]
fn add_image_rejects_unknown_page() {
    let dir = tempdir().unwrap();
    folio_cmd()
        .env("DB_PATH", dir.path().join("cli.db"))
        .args(["add-image", "--url", "u", "--page", "blog"])
        .assert()
        .failure();
}
