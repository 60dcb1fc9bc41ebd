//! Step name to handler mapping supplied by the host application.

use std::collections::HashMap;
use std::fmt;

use crate::constants::HANDLER_PREFIX;
use crate::error::ConfigError;
use crate::store::ConfigStore;

/// A host-supplied initializer step.
pub type Handler = Box<dyn FnMut(&mut ConfigStore) -> anyhow::Result<()> + Send>;

/// Conventional handler name for `step`, e.g. `initialize_logging`.
pub fn handler_name(step: &str) -> String {
    format!("{HANDLER_PREFIX}{step}")
}

/// Explicit table of initializer handlers keyed by step name.
///
/// A handler works on the `&mut ConfigStore` it is passed. It must not reach
/// the store again through its `Namespace`; the run already holds it.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `step`, replacing any previous handler.
    pub fn register<F>(&mut self, step: impl Into<String>, handler: F) -> &mut Self
    where
        F: FnMut(&mut ConfigStore) -> anyhow::Result<()> + Send + 'static,
    {
        self.handlers.insert(step.into(), Box::new(handler));
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with<F>(mut self, step: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&mut ConfigStore) -> anyhow::Result<()> + Send + 'static,
    {
        self.register(step, handler);
        self
    }

    pub fn contains(&self, step: &str) -> bool {
        self.handlers.contains_key(step)
    }

    /// Check that every step in `steps` has a handler.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingInitializer` naming the first unresolved step.
    pub fn validate<S: AsRef<str>>(&self, steps: &[S]) -> Result<(), ConfigError> {
        for step in steps {
            let step: &str = step.as_ref();
            if !self.contains(step) {
                return Err(ConfigError::MissingInitializer {
                    step: step.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Invoke the handler for `step`.
    pub(crate) fn dispatch(&mut self, step: &str, store: &mut ConfigStore) -> Result<(), ConfigError> {
        let handler = self
            .handlers
            .get_mut(step)
            .ok_or_else(|| ConfigError::MissingInitializer {
                step: step.to_string(),
            })?;

        tracing::debug!(step = %step, handler = %handler_name(step), "Running initializer");
        handler(store).map_err(|source| ConfigError::InitializerStep {
            step: step.to_string(),
            source,
        })
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut steps: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        steps.sort_unstable();
        f.debug_struct("HandlerRegistry").field("steps", &steps).finish()
    }
}
