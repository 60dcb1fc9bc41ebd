//! Per-namespace configuration store.
//!
//! Responsibilities:
//! - Hold named options with their declared defaults and descriptions.
//! - Evaluate deferred values on every read.
//! - Expose typed views of the options the initializer pipeline depends on.
//!
//! Does NOT handle:
//! - Process-wide sharing of stores (see `namespace.rs`).
//! - Installing the baseline option set (see `defaults.rs`).
//!
//! Invariants:
//! - Option names are unique; re-declaring a name overwrites default and description.
//! - `set` on an undeclared name creates the option without a description.
//! - Only `config_path`, `environment` and `initializers` are shape-checked.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::constants::{CONFIG_PATH_OPTION, ENVIRONMENT_OPTION, INITIALIZERS_OPTION};
use crate::error::ConfigError;
use crate::search_path;
use crate::types::{ConfigOption, LazyValue, OptionValue};

/// Named configuration options for one namespace.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    namespace: String,
    options: BTreeMap<String, ConfigOption>,
}

impl ConfigStore {
    /// Create an empty store for `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            options: BTreeMap::new(),
        }
    }

    /// The namespace identifier this store belongs to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Declare an option with a default value and description.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        default: impl Into<OptionValue>,
        description: impl Into<String>,
    ) {
        let name = name.into();
        tracing::trace!(namespace = %self.namespace, option = %name, "Declaring option");
        self.options
            .insert(name, ConfigOption::new(default, Some(description.into())));
    }

    /// Declare an option whose default is computed on every read.
    pub fn declare_lazy<F>(&mut self, name: impl Into<String>, f: F, description: impl Into<String>)
    where
        F: Fn(&ConfigStore) -> Result<Option<Value>, ConfigError> + Send + Sync + 'static,
    {
        self.declare(name, LazyValue::new(f), description);
    }

    /// Read an option.
    ///
    /// Returns `Ok(None)` when the option is undeclared or its deferred value
    /// resolved to nothing.
    pub fn get(&self, name: &str) -> Result<Option<Value>, ConfigError> {
        match self.options.get(name).map(|opt| &opt.value) {
            None => Ok(None),
            Some(OptionValue::Value(value)) => Ok(Some(value.clone())),
            Some(OptionValue::Lazy(lazy)) => lazy.evaluate(self),
        }
    }

    /// Assign a concrete value, replacing any deferred value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.assign(name.into(), OptionValue::Value(value.into()));
    }

    /// Assign a deferred value.
    pub fn set_lazy<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&ConfigStore) -> Result<Option<Value>, ConfigError> + Send + Sync + 'static,
    {
        self.assign(name.into(), OptionValue::Lazy(LazyValue::new(f)));
    }

    fn assign(&mut self, name: String, value: OptionValue) {
        match self.options.get_mut(&name) {
            Some(opt) => opt.value = value,
            None => {
                tracing::debug!(namespace = %self.namespace, option = %name, "Setting undeclared option");
                self.options.insert(name, ConfigOption::new(value, None));
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Description given when the option was declared.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(|opt| opt.description.as_deref())
    }

    /// Option names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Resolve every option into one JSON object. Absent values become `null`.
    pub fn snapshot(&self) -> Result<Value, ConfigError> {
        let mut map = Map::new();
        for name in self.options.keys() {
            map.insert(name.clone(), self.get(name)?.unwrap_or(Value::Null));
        }
        Ok(Value::Object(map))
    }

    /// The `config_path` option as a list of directories.
    pub fn search_paths(&self) -> Result<Vec<PathBuf>, ConfigError> {
        match self.get(CONFIG_PATH_OPTION)? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => string_list(CONFIG_PATH_OPTION, value)
                .map(|dirs| dirs.into_iter().map(PathBuf::from).collect()),
        }
    }

    /// The `environment` option.
    pub fn environment(&self) -> Result<String, ConfigError> {
        match self.get(ENVIRONMENT_OPTION)? {
            Some(Value::String(env)) => Ok(env),
            _ => Err(ConfigError::InvalidOption {
                name: ENVIRONMENT_OPTION.to_string(),
                expected: "a string",
            }),
        }
    }

    /// The `initializers` option. Absent means no steps.
    pub fn initializers(&self) -> Result<Vec<String>, ConfigError> {
        match self.get(INITIALIZERS_OPTION)? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => string_list(INITIALIZERS_OPTION, value),
        }
    }

    /// Resolve `parts` against the current `config_path`.
    ///
    /// With no parts, returns the first search directory.
    pub fn config_path<S: AsRef<std::path::Path>>(
        &self,
        parts: &[S],
    ) -> Result<PathBuf, ConfigError> {
        search_path::resolve(&self.search_paths()?, parts)
    }
}

fn string_list(name: &str, value: Value) -> Result<Vec<String>, ConfigError> {
    let invalid = || ConfigError::InvalidOption {
        name: name.to_string(),
        expected: "a list of strings",
    };
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(invalid()),
            })
            .collect(),
        _ => Err(invalid()),
    }
}
