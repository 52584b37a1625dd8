//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log events (e.g. "inspect", "search").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Inspect { .. } => "inspect",
        Commands::Targets { .. } => "targets",
        Commands::Search { .. } => "search",
        Commands::Context { .. } => "context",
    }
}
