//! Declared configuration option.

use super::value::OptionValue;

/// A named option's current value and its description.
#[derive(Debug, Clone)]
pub struct ConfigOption {
    /// Current value, possibly deferred.
    pub value: OptionValue,
    /// Human-readable description given at declaration time.
    pub description: Option<String>,
}

impl ConfigOption {
    pub fn new(value: impl Into<OptionValue>, description: Option<String>) -> Self {
        Self {
            value: value.into(),
            description,
        }
    }
}
