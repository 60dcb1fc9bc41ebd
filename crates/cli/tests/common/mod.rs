//! Shared test utilities for roadie integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Build on-disk config directories for a test project.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.
//! - Commands run with the project directory as their working directory, so the
//!   default `config` search path resolves inside it.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// Returns a hermetic `roadie` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Variables that change defaults are cleared to ensure no leakage from the host.
pub fn roadie_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("roadie");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("RACK_ENV")
        .env_remove("RUST_LOG")
        .env_remove("ROADIE_NAMESPACE")
        .env_remove("ROADIE_CONFIG_PATH");

    cmd
}

/// Returns a hermetic `roadie` command running inside `project`.
pub fn roadie_in(project: &Path) -> Command {
    let mut cmd = roadie_cmd();
    cmd.current_dir(project);
    cmd
}

/// Write `contents` to `project/relative`, creating parent directories.
pub fn write_file(project: &Path, relative: &str, contents: &str) {
    let path = project.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
