//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Render configuration values and run reports as JSON or YAML.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! Invariants:
//! - Absent options render as `null`, never as an empty string.

use anyhow::Result;
use roadie_config::RunReport;
use serde_json::{Value, json};

/// Output format for `show` and `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, yaml", s),
        }
    }
}

pub trait Formatter {
    fn format_value(&self, value: &Value) -> Result<String>;

    fn format_report(&self, report: &RunReport) -> Result<String> {
        self.format_value(&report_to_value(report))
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_value(&self, value: &Value) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format_value(&self, value: &Value) -> Result<String> {
        let rendered = serde_yaml::to_string(value)?;
        Ok(rendered.trim_end().to_string())
    }
}

/// Get a formatter for the given format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
    }
}

fn report_to_value(report: &RunReport) -> Value {
    json!({
        "environment": report.environment,
        "environment_file": report
            .environment_file
            .as_ref()
            .map(|path| path.display().to_string()),
        "steps": report.steps,
    })
}
