//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse `NAME=VALUE` overrides and `STEP=COMMAND` handler bindings.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not touch the namespace (see `config_context` module).

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roadie")]
#[command(about = "Roadie - resolve application configuration and run initializers", long_about = None)]
#[command(
    after_help = "Examples:\n  roadie path database.yml\n  roadie --environment test show\n  roadie -c config -c /etc/myapp show database\n  roadie --set initializers='[migrate]' run --handler migrate='./bin/migrate'\n"
)]
pub struct Cli {
    /// Namespace identifier of the application
    #[arg(short, long, global = true, env = "ROADIE_NAMESPACE", default_value = "app")]
    pub namespace: String,

    /// Directories searched for configuration files, in priority order.
    ///
    /// Replaces the default search path (`config`). Can also be set via
    /// ROADIE_CONFIG_PATH as a comma-separated list.
    #[arg(
        short = 'c',
        long = "config-path",
        global = true,
        env = "ROADIE_CONFIG_PATH",
        value_delimiter = ',',
        value_name = "DIR"
    )]
    pub config_path: Vec<PathBuf>,

    /// Runtime environment (defaults to RACK_ENV, then `development`)
    #[arg(short, long, global = true)]
    pub environment: Option<String>,

    /// Override an option after the environment file is applied (VALUE is parsed as YAML)
    #[arg(long = "set", global = true, value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub overrides: Vec<Assignment>,

    /// Output format (json, yaml)
    #[arg(short, long, global = true, default_value = "json")]
    pub output: String,

    /// Log line format written to stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a path on the configuration search path
    Path {
        /// Path segments below a search directory (none prints the first directory)
        parts: Vec<String>,
    },

    /// Show configuration after the environment file and overrides are applied
    Show {
        /// Show a single option instead of the whole store
        name: Option<String>,
    },

    /// Check that every declared initializer step has a handler
    Check {
        /// Step names that have handlers
        #[arg(long = "handler", value_name = "STEP")]
        handlers: Vec<String>,
    },

    /// Run the initializer pipeline, executing a shell command per step
    Run {
        /// Handler binding; the command runs through the system shell
        #[arg(long = "handler", value_name = "STEP=COMMAND", value_parser = parse_handler)]
        handlers: Vec<HandlerBinding>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// A `--set NAME=VALUE` override.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: Value,
}

/// A `--handler STEP=COMMAND` binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerBinding {
    pub step: String,
    pub command: String,
}

fn split_pair<'a>(raw: &'a str, what: &str) -> Result<(&'a str, &'a str), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected {what}, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }
    Ok((name, value))
}

/// Parse `NAME=VALUE`, reading VALUE as YAML and falling back to a plain string.
pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (name, value) = split_pair(raw, "NAME=VALUE")?;
    let value = if value.trim().is_empty() {
        Value::String(value.to_string())
    } else {
        serde_yaml::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
    };
    Ok(Assignment {
        name: name.to_string(),
        value,
    })
}

/// Parse `STEP=COMMAND`.
pub fn parse_handler(raw: &str) -> Result<HandlerBinding, String> {
    let (step, command) = split_pair(raw, "STEP=COMMAND")?;
    if command.trim().is_empty() {
        return Err(format!("missing command for step '{step}'"));
    }
    Ok(HandlerBinding {
        step: step.to_string(),
        command: command.to_string(),
    })
}
