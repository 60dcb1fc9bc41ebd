//! Initializer pipeline command with shell-command handlers.
//!
//! Responsibilities:
//! - Bind each `--handler STEP=COMMAND` to a step that runs COMMAND in the system shell.
//! - Run the pipeline and print the run report.
//!
//! Does NOT handle:
//! - Timeouts or retries for handler commands.
//!
//! Invariants:
//! - Handler commands see `ROADIE_NAMESPACE`, `ROADIE_ENVIRONMENT` and `ROADIE_STEP`.
//! - Handler stdout goes to stderr so stdout carries only the report.
//! - A non-zero exit status fails the step and stops the run.

use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use roadie_config::{ConfigStore, HandlerRegistry};

use crate::args::HandlerBinding;
use crate::config_context::NamespaceContext;
use crate::formatters::{OutputFormat, get_formatter};

pub fn run(ctx: &NamespaceContext, handlers: &[HandlerBinding], output_format: &str) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;

    let mut registry = HandlerRegistry::new();
    for binding in handlers {
        let step = binding.step.clone();
        let command = binding.command.clone();
        registry.register(binding.step.as_str(), move |cfg| run_shell(cfg, &step, &command));
    }

    let report = ctx
        .namespace()
        .setup_with(&mut registry, |cfg| ctx.apply_overrides(cfg))?;

    println!("{}", get_formatter(format).format_report(&report)?);
    Ok(())
}

fn shell() -> (&'static str, &'static str) {
    if cfg!(windows) {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

fn run_shell(cfg: &mut ConfigStore, step: &str, command: &str) -> Result<()> {
    let environment = cfg.environment()?;
    let (program, flag) = shell();

    tracing::info!(step = %step, command = %command, "Running initializer command");
    let status = Command::new(program)
        .arg(flag)
        .arg(command)
        .env("ROADIE_NAMESPACE", cfg.namespace())
        .env("ROADIE_ENVIRONMENT", &environment)
        .env("ROADIE_STEP", step)
        .stdin(Stdio::null())
        .stdout(Stdio::from(std::io::stderr()))
        .status()
        .with_context(|| format!("Failed to spawn `{command}`"))?;

    if !status.success() {
        anyhow::bail!("`{command}` exited with {status}");
    }
    Ok(())
}
