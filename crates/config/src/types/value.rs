//! Option values: concrete or deferred.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ConfigError;
use crate::store::ConfigStore;

/// Signature of a deferred computation.
///
/// The closure receives the store it is read from so it can consult other
/// options (for example the current `config_path`).
pub type LazyFn = dyn Fn(&ConfigStore) -> Result<Option<Value>, ConfigError> + Send + Sync;

/// A computation evaluated on every read. Results are never cached.
#[derive(Clone)]
pub struct LazyValue(Arc<LazyFn>);

impl LazyValue {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ConfigStore) -> Result<Option<Value>, ConfigError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the computation against `store`.
    pub fn evaluate(&self, store: &ConfigStore) -> Result<Option<Value>, ConfigError> {
        (self.0)(store)
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazyValue(..)")
    }
}

/// The value held by a configuration option.
#[derive(Debug, Clone)]
pub enum OptionValue {
    /// A fixed value.
    Value(Value),
    /// A computation re-evaluated on each `get`.
    Lazy(LazyValue),
}

impl OptionValue {
    pub fn is_lazy(&self) -> bool {
        matches!(self, OptionValue::Lazy(_))
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        OptionValue::Value(value)
    }
}

impl From<LazyValue> for OptionValue {
    fn from(value: LazyValue) -> Self {
        OptionValue::Lazy(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_lazy_value_is_evaluated_every_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = LazyValue::new(move |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Ok(Some(json!(n)))
        });

        let store = ConfigStore::new("lazy-test");
        assert_eq!(lazy.evaluate(&store).unwrap(), Some(json!(0)));
        assert_eq!(lazy.evaluate(&store).unwrap(), Some(json!(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_option_value_conversions() {
        assert!(!OptionValue::from(json!("x")).is_lazy());
        assert!(OptionValue::from(LazyValue::new(|_| Ok(None))).is_lazy());
    }
}
