//! Process environment helpers.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering.
//! - Determine the default environment name from `RACK_ENV`.
//! - Load a `.env` file on request, gated by `DOTENV_DISABLED`.
//!
//! Does NOT handle:
//! - Applying environment files from the search path (see `environment_file.rs`).
//!
//! Invariants / Assumptions:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use crate::constants::{DEFAULT_ENVIRONMENT, ENVIRONMENT_VAR};
use crate::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// The environment name selected by `RACK_ENV`, falling back to `development`.
pub fn default_environment() -> String {
    env_var_or_none(ENVIRONMENT_VAR).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Load environment variables from a `.env` file if present.
///
/// Call this before installing defaults so that `RACK_ENV` can come from `.env`.
/// If `DOTENV_DISABLED` is set to "true" or "1", nothing is loaded.
///
/// # Errors
///
/// - `ConfigError::DotenvParse` when the file exists but has invalid syntax.
/// - `ConfigError::DotenvIo` when the file exists but cannot be read.
///
/// Missing `.env` files are silently ignored.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(())
        }
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => {
            Err(ConfigError::DotenvParse { error_index: idx })
        }
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}
