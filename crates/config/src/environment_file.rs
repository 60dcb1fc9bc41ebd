//! Environment-specific override files.
//!
//! Responsibilities:
//! - Locate `environments/<environment>.yml` on the search path.
//! - Apply its entries to the store as a sequence of `set` calls.
//!
//! Does NOT handle:
//! - Deciding when the file is applied (see `initializer`).
//!
//! Invariants:
//! - A missing file is not an error; nothing is applied.
//! - Entries are applied in document order.
//! - The file can only assign options; it cannot run code.

use std::path::{Path, PathBuf};

use serde_json::Value;
use serde_yaml::Mapping;

use crate::constants::{ENVIRONMENT_FILE_EXTENSION, ENVIRONMENTS_DIR};
use crate::error::ConfigError;
use crate::store::ConfigStore;

/// Path of the environment file for `environment`, resolved on the store's search path.
pub fn environment_file_path(
    store: &ConfigStore,
    environment: &str,
) -> Result<PathBuf, ConfigError> {
    let file_name = format!("{environment}.{ENVIRONMENT_FILE_EXTENSION}");
    store.config_path(&[ENVIRONMENTS_DIR, file_name.as_str()])
}

/// Apply the environment file for `environment` if one exists.
///
/// Returns the path of the applied file, or `None` when there was nothing to apply.
pub fn apply_environment_file(
    store: &mut ConfigStore,
    environment: &str,
) -> Result<Option<PathBuf>, ConfigError> {
    let path = environment_file_path(store, environment)?;
    if !path.is_file() {
        tracing::debug!(
            path = %path.display(),
            environment = %environment,
            "No environment file, skipping"
        );
        return Ok(None);
    }

    let entries = parse_environment_file(&path)?;
    tracing::info!(
        path = %path.display(),
        environment = %environment,
        options = entries.len(),
        "Applying environment file"
    );
    for (name, value) in entries {
        store.set(name, value);
    }
    Ok(Some(path))
}

/// Read an environment file into ordered `(option, value)` assignments.
pub fn parse_environment_file(path: &Path) -> Result<Vec<(String, Value)>, ConfigError> {
    let err = |message: String| ConfigError::EnvironmentFile {
        path: path.to_path_buf(),
        message,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| err(e.to_string()))?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: serde_yaml::Value =
        serde_yaml::from_str(&contents).map_err(|e| err(e.to_string()))?;
    let mapping: Mapping = match document {
        serde_yaml::Value::Null => return Ok(Vec::new()),
        serde_yaml::Value::Mapping(mapping) => mapping,
        _ => return Err(err("expected a mapping of option names to values".to_string())),
    };

    mapping
        .into_iter()
        .map(|(key, value)| {
            let name = match key {
                serde_yaml::Value::String(name) => name,
                other => return Err(err(format!("option name must be a string, got {other:?}"))),
            };
            let value = serde_json::to_value(value)
                .map_err(|e| err(format!("option '{name}': {e}")))?;
            Ok((name, value))
        })
        .collect()
}
