//! Resolved configuration display command.
//!
//! Responsibilities:
//! - Apply the environment file and `--set` overrides without running any step.
//! - Print the whole store, or one option, in the selected output format.
//!
//! Does NOT handle:
//! - Running initializer steps (see `run`).
//!
//! Invariants:
//! - A declared option without a value (e.g. `database` with no file) prints `null`.
//! - Only names that were never declared or set are an error.

use anyhow::Result;
use roadie_config::{HandlerRegistry, InitializerRun};
use serde_json::Value;

use crate::config_context::NamespaceContext;
use crate::formatters::{OutputFormat, get_formatter};

pub fn run(ctx: &NamespaceContext, name: Option<&str>, output_format: &str) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;

    let mut store = ctx.namespace().config();
    let mut handlers = HandlerRegistry::new();
    let mut run = InitializerRun::new(&mut store, &mut handlers);
    run.prepare_with(|cfg| ctx.apply_overrides(cfg))?;

    let store = run.store();
    let value = match name {
        Some(name) if !store.contains(name) => anyhow::bail!("Option '{name}' is not declared"),
        Some(name) => store.get(name)?.unwrap_or(Value::Null),
        None => store.snapshot()?,
    };

    println!("{}", get_formatter(format).format_value(&value)?);
    Ok(())
}
