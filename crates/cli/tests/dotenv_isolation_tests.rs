//! Regression tests for hermetic test isolation around dotenv loading.
//!
//! Responsibilities:
//! - Prove that setting `DOTENV_DISABLED=1` prevents the CLI from loading `.env`.
//! - Prove that when not disabled, the CLI loads `.env` from the working directory.
//!
//! Invariants / assumptions:
//! - The CLI loads dotenv before clap parsing, so `.env` can feed `RACK_ENV`
//!   and clap `env = "..."` defaults.

mod common;

use common::{roadie_in, write_file};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_dotenv_disabled_ignores_env_file() {
    let project = TempDir::new().unwrap();
    write_file(project.path(), ".env", "RACK_ENV=from_dotenv\n");

    roadie_in(project.path())
        .env("DOTENV_DISABLED", "1")
        .args(["show", "environment"])
        .assert()
        .success()
        .stdout(predicate::str::contains("development"));
}

#[test]
fn test_dotenv_enabled_loads_env_file() {
    let project = TempDir::new().unwrap();
    write_file(
        project.path(),
        ".env",
        "RACK_ENV=from_dotenv\nROADIE_CONFIG_PATH=settings\n",
    );

    roadie_in(project.path())
        .env_remove("DOTENV_DISABLED")
        .args(["show", "environment"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from_dotenv"));

    roadie_in(project.path())
        .env_remove("DOTENV_DISABLED")
        .arg("path")
        .assert()
        .success()
        .stdout("settings\n");
}

#[test]
fn test_malformed_dotenv_fails_before_parsing() {
    let project = TempDir::new().unwrap();
    write_file(project.path(), ".env", "INVALID_LINE_WITHOUT_EQUALS");

    roadie_in(project.path())
        .env_remove("DOTENV_DISABLED")
        .arg("show")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load environment"));
}
