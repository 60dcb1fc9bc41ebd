//! Search-path resolution command.
//!
//! Responsibilities:
//! - Print the first existing candidate for the given path segments.
//!
//! Does NOT handle:
//! - Creating missing files or directories.
//!
//! Invariants:
//! - Output is a single line on stdout, even when nothing exists on disk.

use anyhow::Result;

use crate::config_context::NamespaceContext;

pub fn run(ctx: &NamespaceContext, parts: &[String]) -> Result<()> {
    let path = ctx.namespace().config_path(parts)?;
    println!("{}", path.display());
    Ok(())
}
