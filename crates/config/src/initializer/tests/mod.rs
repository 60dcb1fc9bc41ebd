//! Tests for the initializer pipeline.
//!
//! Responsibilities:
//! - Test step ordering and duplicate handling.
//! - Test environment-file loading and override precedence.
//! - Test fail-fast behavior and run state transitions.
//!
//! Invariants:
//! - Every fixture lives in its own `tempfile` directory.
//! - Fixtures set `environment` explicitly so `RACK_ENV` on the host does not leak in.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::json;
use tempfile::TempDir;

use crate::constants::{CONFIG_PATH_OPTION, ENVIRONMENT_OPTION, ENVIRONMENTS_DIR, INITIALIZERS_OPTION};
use crate::defaults::install_defaults;
use crate::store::ConfigStore;

use super::HandlerRegistry;

pub mod environment_tests;

/// A store with defaults installed, searching only `dir`, in the `test` environment.
pub fn fixture_store(dir: &Path) -> ConfigStore {
    let mut store = ConfigStore::new("initializer-test");
    install_defaults(&mut store);
    store.set(CONFIG_PATH_OPTION, json!([dir.to_string_lossy()]));
    store.set(ENVIRONMENT_OPTION, "test");
    store
}

/// Write `environments/<name>.yml` below `dir`.
pub fn write_environment(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let env_dir = dir.join(ENVIRONMENTS_DIR);
    fs::create_dir_all(&env_dir).unwrap();
    let path = env_dir.join(format!("{name}.yml"));
    fs::write(&path, contents).unwrap();
    path
}

pub fn set_steps(store: &mut ConfigStore, steps: &[&str]) {
    store.set(INITIALIZERS_OPTION, json!(steps));
}

/// Shared call log written by recording handlers.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// A registry whose handlers append their step name to the returned log.
pub fn recording_registry(steps: &[&str]) -> (HandlerRegistry, CallLog) {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut registry = HandlerRegistry::new();
    for step in steps {
        let log = Arc::clone(&log);
        let name = step.to_string();
        registry.register(*step, move |_| {
            log.lock().unwrap().push(name.clone());
            Ok(())
        });
    }
    (registry, log)
}

pub fn temp_config_dir() -> TempDir {
    TempDir::new().unwrap()
}
