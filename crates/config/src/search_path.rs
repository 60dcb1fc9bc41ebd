//! Hierarchical search-path resolution.
//!
//! Responsibilities:
//! - Find the first search directory in which a relative path exists.
//! - Fall back to a well-formed path under the first directory when none does.
//!
//! Does NOT handle:
//! - Reading or parsing the resolved file.
//!
//! Invariants:
//! - Earlier directories win; a later match is never returned over an earlier one.
//! - An empty search path is an error, never an empty-root join.
//! - Existence means any filesystem entry (file or directory).

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Resolve `parts` against `search_paths`.
///
/// Returns the first `dir/parts` that exists. When none exists, returns the
/// candidate under the first directory, for callers that will create it.
/// With empty `parts`, returns the first directory itself.
///
/// # Errors
///
/// `ConfigError::EmptySearchPath` when `search_paths` is empty.
pub fn resolve<P, S>(search_paths: &[P], parts: &[S]) -> Result<PathBuf, ConfigError>
where
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    let first = search_paths.first().ok_or(ConfigError::EmptySearchPath)?;
    if parts.is_empty() {
        return Ok(first.as_ref().to_path_buf());
    }

    for dir in search_paths {
        let candidate = join(dir.as_ref(), parts);
        if candidate.exists() {
            tracing::trace!(path = %candidate.display(), "Resolved config path");
            return Ok(candidate);
        }
    }

    let fallback = join(first.as_ref(), parts);
    tracing::trace!(path = %fallback.display(), "No match on search path, using first directory");
    Ok(fallback)
}

fn join<S: AsRef<Path>>(dir: &Path, parts: &[S]) -> PathBuf {
    let mut path = dir.to_path_buf();
    for part in parts {
        path.push(part);
    }
    path
}
