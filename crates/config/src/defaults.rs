//! Baseline option set installed into every namespace.
//!
//! Responsibilities:
//! - Declare `config_path`, `initializers`, `environment` and `database`.
//! - Provide the deferred loader behind `database`.
//!
//! Does NOT handle:
//! - Loading environment files (see `environment_file.rs`).
//!
//! Invariants:
//! - Installing twice yields the same option values as installing once.
//! - `environment` is read from `RACK_ENV` at install time, not at read time.
//! - `database` re-reads `database.yml` on every access and is never cached.

use std::path::Path;

use serde_json::{Value, json};

use crate::constants::{
    CONFIG_PATH_OPTION, DATABASE_FILE, DATABASE_OPTION, DEFAULT_CONFIG_DIR, ENVIRONMENT_OPTION,
    INITIALIZERS_OPTION,
};
use crate::env::default_environment;
use crate::error::ConfigError;
use crate::store::ConfigStore;

const CONFIG_PATH_DESC: &str =
    "Array of paths to search for configuration and environment files.";

const INITIALIZERS_DESC: &str = "Array of initializers to invoke when setting up the system.";

const ENVIRONMENT_DESC: &str = "The current runtime environment. \
    Can be one of production, development or test.";

const DATABASE_DESC: &str = "The database configuration settings for the various supported \
    environments. These settings are loaded from the 'database.yml' file in the \
    configuration path.";

/// Declare the baseline options in `store`.
pub fn install_defaults(store: &mut ConfigStore) {
    let environment = default_environment();
    tracing::debug!(
        namespace = %store.namespace(),
        environment = %environment,
        "Installing default configuration"
    );

    store.declare(CONFIG_PATH_OPTION, json!([DEFAULT_CONFIG_DIR]), CONFIG_PATH_DESC);
    store.declare(INITIALIZERS_OPTION, json!([]), INITIALIZERS_DESC);
    store.declare(ENVIRONMENT_OPTION, Value::String(environment), ENVIRONMENT_DESC);
    store.declare_lazy(DATABASE_OPTION, load_database, DATABASE_DESC);
}

/// Deferred loader for the `database` option.
///
/// Resolves `database.yml` on the current search path and parses it when it
/// exists. A missing file yields no value.
pub fn load_database(store: &ConfigStore) -> Result<Option<Value>, ConfigError> {
    let path = store.config_path(&[DATABASE_FILE])?;
    if !path.is_file() {
        tracing::trace!(path = %path.display(), "No database settings file");
        return Ok(None);
    }
    read_yaml(&path).map(Some)
}

fn read_yaml(path: &Path) -> Result<Value, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::DatabaseFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::DatabaseFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
