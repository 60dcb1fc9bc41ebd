//! CLI command implementations.

pub mod check;
pub mod path;
pub mod run;
pub mod show;
