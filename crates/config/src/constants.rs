//! Centralized constants for option names, file locations and defaults.
//!
//! This module contains the names every namespace shares so that the
//! defaults installer, the initializer and the CLI agree on them.

// =============================================================================
// Option Names
// =============================================================================

/// Ordered list of directories searched for configuration files.
pub const CONFIG_PATH_OPTION: &str = "config_path";

/// Ordered list of initializer step names.
pub const INITIALIZERS_OPTION: &str = "initializers";

/// Name of the current runtime environment.
pub const ENVIRONMENT_OPTION: &str = "environment";

/// Lazily loaded database settings.
pub const DATABASE_OPTION: &str = "database";

// =============================================================================
// Defaults
// =============================================================================

/// Default search directory, relative to the process working directory.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment used when `RACK_ENV` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Process environment variable that selects the default environment.
pub const ENVIRONMENT_VAR: &str = "RACK_ENV";

// =============================================================================
// File Layout
// =============================================================================

/// Directory (below a search directory) holding per-environment files.
pub const ENVIRONMENTS_DIR: &str = "environments";

/// Extension of per-environment files.
pub const ENVIRONMENT_FILE_EXTENSION: &str = "yml";

/// Database settings file name.
pub const DATABASE_FILE: &str = "database.yml";

/// Prefix of the conventional handler name for an initializer step.
pub const HANDLER_PREFIX: &str = "initialize_";
