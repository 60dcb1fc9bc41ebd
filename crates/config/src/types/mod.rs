//! Configuration option types.
//!
//! Responsibilities:
//! - Define the tagged option value (concrete or deferred).
//! - Define the declared option record held by a `ConfigStore`.
//!
//! Does NOT handle:
//! - Storage or lookup of options (see `store.rs`).
//! - Validation of value types; values are untyped JSON.
//!
//! Invariants:
//! - A deferred value is evaluated fresh on every read.

mod option;
mod value;

pub use option::ConfigOption;
pub use value::{LazyFn, LazyValue, OptionValue};
