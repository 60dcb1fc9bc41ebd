//! Namespace context for command execution.
//!
//! Responsibilities:
//! - Register the namespace named on the command line.
//! - Apply `--config-path` and `--environment` before any run starts.
//! - Apply `--set` overrides as the run's override callback.
//!
//! Does NOT handle:
//! - CLI argument definitions (see `args` module).
//!
//! Invariants:
//! - An empty `--config-path` list leaves the default search path untouched.
//! - Overrides are applied in command-line order, so the last one wins.

use std::sync::Arc;

use roadie_config::constants::{CONFIG_PATH_OPTION, ENVIRONMENT_OPTION};
use roadie_config::{ConfigStore, Namespace};
use serde_json::Value;

use crate::args::{Assignment, Cli};

pub(crate) struct NamespaceContext {
    namespace: Arc<Namespace>,
    overrides: Vec<Assignment>,
}

impl NamespaceContext {
    pub(crate) fn from_cli(cli: &Cli) -> Self {
        let namespace = Namespace::register(&cli.namespace);
        {
            let mut config = namespace.config();
            if !cli.config_path.is_empty() {
                let dirs = cli
                    .config_path
                    .iter()
                    .map(|dir| Value::String(dir.to_string_lossy().into_owned()))
                    .collect::<Vec<_>>();
                tracing::debug!(paths = ?cli.config_path, "Using search path from command line");
                config.set(CONFIG_PATH_OPTION, Value::Array(dirs));
            }
            if let Some(environment) = cli.environment.as_deref() {
                config.set(ENVIRONMENT_OPTION, environment);
            }
        }

        Self {
            namespace,
            overrides: cli.overrides.clone(),
        }
    }

    pub(crate) fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Override callback applied after the environment file.
    pub(crate) fn apply_overrides(&self, store: &mut ConfigStore) {
        for assignment in &self.overrides {
            store.set(assignment.name.as_str(), assignment.value.clone());
        }
    }
}
