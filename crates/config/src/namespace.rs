//! Application namespaces and the process-wide namespace registry.
//!
//! Responsibilities:
//! - Give each application identifier exactly one `ConfigStore`.
//! - Expose the host-facing operations: install defaults, resolve paths, run setup.
//!
//! Does NOT handle:
//! - Tearing namespaces down; registered namespaces live until process exit.
//!
//! Invariants:
//! - Registering the same identifier twice returns the same instance.
//! - Defaults are installed once, on first registration.
//! - A setup run holds the store lock for its whole duration. Handlers must use
//!   the `&mut ConfigStore` they are given; `config_path`, `config_dir` and
//!   `setup*` fail with `NamespaceBusy` instead of waiting while a run holds it.
//! - The lock is not held between operations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, TryLockError};

use crate::defaults::install_defaults;
use crate::error::ConfigError;
use crate::initializer::{HandlerRegistry, InitializerRun, RunReport};
use crate::store::ConfigStore;

fn registry() -> &'static Mutex<HashMap<String, Arc<Namespace>>> {
    static REGISTRY: OnceLock<Mutex<HashMap<String, Arc<Namespace>>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// One application's isolated configuration scope.
#[derive(Debug)]
pub struct Namespace {
    name: String,
    store: Mutex<ConfigStore>,
}

impl Namespace {
    /// Create a standalone namespace with defaults installed.
    ///
    /// The namespace is not added to the process-wide registry.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut store = ConfigStore::new(name.clone());
        install_defaults(&mut store);
        Self {
            name,
            store: Mutex::new(store),
        }
    }

    /// Return the registered namespace for `name`, creating it on first use.
    pub fn register(name: &str) -> Arc<Namespace> {
        let mut namespaces = registry().lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = namespaces.get(name) {
            return Arc::clone(existing);
        }

        tracing::info!(namespace = %name, "Registering namespace");
        let namespace = Arc::new(Namespace::new(name));
        namespaces.insert(name.to_string(), Arc::clone(&namespace));
        namespace
    }

    /// The registered namespace for `name`, if any.
    pub fn lookup(name: &str) -> Option<Arc<Namespace>> {
        registry()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access the namespace's store, waiting for any other holder.
    ///
    /// Never call this from an initializer handler of the same namespace; the
    /// running setup holds the lock. Use the store passed to the handler.
    pub fn config(&self) -> MutexGuard<'_, ConfigStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Access the namespace's store without waiting.
    ///
    /// # Errors
    ///
    /// `ConfigError::NamespaceBusy` while the store is held, e.g. by a setup run.
    pub fn try_config(&self) -> Result<MutexGuard<'_, ConfigStore>, ConfigError> {
        match self.store.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => {
                tracing::warn!(namespace = %self.name, "Namespace store is busy");
                Err(ConfigError::NamespaceBusy {
                    namespace: self.name.clone(),
                })
            }
        }
    }

    /// Re-declare the baseline options.
    pub fn install_defaults(&self) {
        install_defaults(&mut self.config());
    }

    /// Resolve `parts` on the namespace's search path.
    pub fn config_path<S: AsRef<Path>>(&self, parts: &[S]) -> Result<PathBuf, ConfigError> {
        self.try_config()?.config_path(parts)
    }

    /// The first directory on the search path.
    pub fn config_dir(&self) -> Result<PathBuf, ConfigError> {
        self.config_path::<&str>(&[])
    }

    /// Run the initializer pipeline.
    ///
    /// Handlers receive the namespace's store directly and must not call back
    /// into this `Namespace`; such calls fail with `NamespaceBusy`.
    pub fn setup(&self, handlers: &mut HandlerRegistry) -> Result<RunReport, ConfigError> {
        let mut store = self.try_config()?;
        InitializerRun::new(&mut store, handlers).process()
    }

    /// Run the initializer pipeline, applying `override_fn` after the environment file.
    pub fn setup_with<F>(
        &self,
        handlers: &mut HandlerRegistry,
        override_fn: F,
    ) -> Result<RunReport, ConfigError>
    where
        F: FnOnce(&mut ConfigStore),
    {
        let mut store = self.try_config()?;
        InitializerRun::new(&mut store, handlers).process_with(override_fn)
    }
}
