//! Error types for configuration resolution and the initializer pipeline.
//!
//! Responsibilities:
//! - Define one error enum shared by the store, the search-path resolver,
//!   the environment-file loader and the initializer run.
//! - Keep each fatal condition a distinct variant so callers can match on it.
//!
//! Does NOT handle:
//! - Exit code mapping (see the CLI crate).
//!
//! Invariants:
//! - A missing environment file and a missing `database.yml` are never errors.
//! - `MissingInitializer` and `EnvironmentFile` are always distinguishable.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::initializer::RunState;

/// Errors that can occur while resolving configuration or running initializers.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `config_path` held no directories when a path had to be resolved.
    #[error("config_path is empty; at least one search directory is required")]
    EmptySearchPath,

    /// One of the core options holds a value of the wrong shape.
    #[error("Invalid value for option '{name}': expected {expected}")]
    InvalidOption { name: String, expected: &'static str },

    /// The environment file exists but could not be read or applied.
    #[error("Failed to load environment file at {path}: {message}")]
    EnvironmentFile { path: PathBuf, message: String },

    /// `database.yml` exists but is not valid YAML.
    #[error("Failed to parse database settings at {path}: {message}")]
    DatabaseFile { path: PathBuf, message: String },

    /// A declared initializer step has no registered handler.
    #[error("No initializer registered for step '{step}' (expected handler `initialize_{step}`)")]
    MissingInitializer { step: String },

    /// A registered handler returned an error.
    #[error("Initializer step '{step}' failed")]
    InitializerStep {
        step: String,
        #[source]
        source: anyhow::Error,
    },

    /// The namespace's store is held by a setup run in progress, e.g. a handler
    /// called back into its own namespace instead of using the store it was given.
    #[error("Namespace '{namespace}' is busy running initializers")]
    NamespaceBusy { namespace: String },

    /// An initializer run was driven out of order or reused.
    #[error("Initializer run is in state {actual:?}, expected {expected:?}")]
    InvalidRunState { expected: RunState, actual: RunState },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// The step name carried by step-related errors, if any.
    pub fn step(&self) -> Option<&str> {
        match self {
            ConfigError::MissingInitializer { step } | ConfigError::InitializerStep { step, .. } => {
                Some(step)
            }
            _ => None,
        }
    }
}
