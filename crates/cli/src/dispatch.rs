//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Namespace setup (see `config_context`).
//!
//! Invariants:
//! - Commands are routed based on the top-level Commands enum variant.

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::config_context::NamespaceContext;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli, ctx: &NamespaceContext) -> Result<()> {
    match cli.command {
        Commands::Path { parts } => commands::path::run(ctx, &parts),
        Commands::Show { name } => commands::show::run(ctx, name.as_deref(), &cli.output),
        Commands::Check { handlers } => commands::check::run(ctx, &handlers),
        Commands::Run { handlers } => commands::run::run(ctx, &handlers, &cli.output),
    }
}
