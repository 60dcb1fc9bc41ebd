//! Initializer pipeline.
//!
//! Responsibilities:
//! - Load the environment file for the current environment.
//! - Apply the caller's override callback.
//! - Dispatch each declared initializer step, in order, to its handler.
//!
//! Does NOT handle:
//! - Registering handlers (the host application supplies a `HandlerRegistry`).
//! - Running steps concurrently, retrying them, or cancelling them.
//!
//! Invariants:
//! - A run moves Created -> EnvironmentLoaded -> OverrideApplied -> StepsRunning -> Done,
//!   or to Failed at the first error. No state is revisited.
//! - The environment file is applied at most once per run, before any step.
//! - The environment name is captured when the run starts. If the environment
//!   file, the override or a step changes `environment`, the captured value is
//!   written back, so handlers and the report always agree.
//! - `initializers` is read after the override, so the override can change the steps.
//! - The first missing or failing step ends the run; later steps never run.

mod handlers;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use crate::constants::ENVIRONMENT_OPTION;
use crate::environment_file::apply_environment_file;
use crate::error::ConfigError;
use crate::store::ConfigStore;

pub use handlers::{Handler, HandlerRegistry, handler_name};

/// Position of an initializer run in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Created,
    EnvironmentLoaded,
    OverrideApplied,
    StepsRunning,
    Done,
    Failed,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Environment the run was performed for.
    pub environment: String,
    /// Environment file that was applied, if one existed.
    pub environment_file: Option<PathBuf>,
    /// Steps executed, in order.
    pub steps: Vec<String>,
}

/// A single pass of the initializer pipeline over one store.
///
/// A run is not reusable: once it has left `Created` it can only move forward.
pub struct InitializerRun<'a> {
    store: &'a mut ConfigStore,
    handlers: &'a mut HandlerRegistry,
    state: RunState,
    environment: Option<String>,
    environment_file: Option<PathBuf>,
    completed: Vec<String>,
}

impl<'a> InitializerRun<'a> {
    pub fn new(store: &'a mut ConfigStore, handlers: &'a mut HandlerRegistry) -> Self {
        Self {
            store,
            handlers,
            state: RunState::Created,
            environment: None,
            environment_file: None,
            completed: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Steps that finished successfully so far.
    pub fn completed_steps(&self) -> &[String] {
        &self.completed
    }

    /// Environment captured at the start of the run.
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Read-only view of the store, e.g. to inspect it after `prepare`.
    pub fn store(&self) -> &ConfigStore {
        &*self.store
    }

    /// Load the environment file, leaving the run in `OverrideApplied`.
    pub fn prepare(&mut self) -> Result<(), ConfigError> {
        self.prepare_inner(None::<fn(&mut ConfigStore)>)
    }

    /// Load the environment file, then hand the store to `override_fn`.
    pub fn prepare_with<F>(&mut self, override_fn: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut ConfigStore),
    {
        self.prepare_inner(Some(override_fn))
    }

    /// Run every declared step, finishing the run.
    pub fn run_steps(&mut self) -> Result<RunReport, ConfigError> {
        self.expect_state(RunState::OverrideApplied)?;
        let result = self.dispatch_steps();
        self.finish(result)?;
        self.transition(RunState::Done);

        let report = RunReport {
            environment: self.environment.clone().unwrap_or_default(),
            environment_file: self.environment_file.clone(),
            steps: self.completed.clone(),
        };
        tracing::info!(
            namespace = %self.store.namespace(),
            environment = %report.environment,
            steps = report.steps.len(),
            "Initialization complete"
        );
        Ok(report)
    }

    /// Run the whole pipeline without an override.
    pub fn process(mut self) -> Result<RunReport, ConfigError> {
        self.prepare()?;
        self.run_steps()
    }

    /// Run the whole pipeline, applying `override_fn` after the environment file.
    pub fn process_with<F>(mut self, override_fn: F) -> Result<RunReport, ConfigError>
    where
        F: FnOnce(&mut ConfigStore),
    {
        self.prepare_with(override_fn)?;
        self.run_steps()
    }

    fn prepare_inner<F>(&mut self, override_fn: Option<F>) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut ConfigStore),
    {
        self.expect_state(RunState::Created)?;
        let result = self.load_environment();
        self.finish(result)?;
        self.transition(RunState::EnvironmentLoaded);

        if let Some(override_fn) = override_fn {
            tracing::debug!(namespace = %self.store.namespace(), "Applying configuration override");
            override_fn(self.store);
        }
        self.restore_environment();
        self.transition(RunState::OverrideApplied);
        Ok(())
    }

    fn load_environment(&mut self) -> Result<(), ConfigError> {
        let environment = self.store.environment()?;
        tracing::info!(
            namespace = %self.store.namespace(),
            environment = %environment,
            "Starting initialization"
        );
        self.environment_file = apply_environment_file(self.store, &environment)?;
        self.environment = Some(environment);
        Ok(())
    }

    fn dispatch_steps(&mut self) -> Result<(), ConfigError> {
        let steps = self.store.initializers()?;
        self.transition(RunState::StepsRunning);
        for step in steps {
            self.handlers.dispatch(&step, self.store)?;
            self.restore_environment();
            self.completed.push(step);
        }
        Ok(())
    }

    fn restore_environment(&mut self) {
        let Some(captured) = self.environment.clone() else {
            return;
        };
        match self.store.environment() {
            Ok(current) if current == captured => {}
            current => {
                tracing::warn!(
                    namespace = %self.store.namespace(),
                    environment = %captured,
                    current = ?current.ok(),
                    "environment changed during initialization; restoring the value the run started with"
                );
                self.store.set(ENVIRONMENT_OPTION, captured);
            }
        }
    }

    fn expect_state(&self, expected: RunState) -> Result<(), ConfigError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ConfigError::InvalidRunState {
                expected,
                actual: self.state,
            })
        }
    }

    fn finish(&mut self, result: Result<(), ConfigError>) -> Result<(), ConfigError> {
        result.inspect_err(|err| {
            tracing::warn!(
                namespace = %self.store.namespace(),
                state = ?self.state,
                error = %err,
                "Initialization failed"
            );
            self.state = RunState::Failed;
        })
    }

    fn transition(&mut self, to: RunState) {
        tracing::trace!(from = ?self.state, to = ?to, "Initializer state change");
        self.state = to;
    }
}

/// Run the pipeline for `store` without an override.
pub fn run(store: &mut ConfigStore, handlers: &mut HandlerRegistry) -> Result<RunReport, ConfigError> {
    InitializerRun::new(store, handlers).process()
}

/// Run the pipeline for `store`, applying `override_fn` after the environment file.
pub fn run_with<F>(
    store: &mut ConfigStore,
    handlers: &mut HandlerRegistry,
    override_fn: F,
) -> Result<RunReport, ConfigError>
where
    F: FnOnce(&mut ConfigStore),
{
    InitializerRun::new(store, handlers).process_with(override_fn)
}
