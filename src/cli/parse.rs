//! CLI parse: clap types for Statescope. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Statescope CLI - Live state inspection for low-code apps
#[derive(Parser)]
#[command(name = "statescope")]
#[command(about = "Resolve and inspect the live state of a low-code app under construction")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (holds config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// App document and editor-state snapshot to inspect
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// App document (JSON, or TOML with a .toml extension)
    #[arg(long)]
    pub app: PathBuf,

    /// Editor-state snapshot: selection, query results, environment facts
    #[arg(long)]
    pub editor: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved state of the active (or named) target
    Inspect {
        #[command(flatten)]
        input: InputArgs,
        /// Target id (e.g. widget:input1, query:q1); defaults to the active target
        #[arg(long)]
        target: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List every target, grouped, with the active one marked
    Targets {
        #[command(flatten)]
        input: InputArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Filter a target's resolved state by free text
    Search {
        #[command(flatten)]
        input: InputArgs,
        /// Text to search for
        #[arg(long)]
        query: String,
        /// Target id; defaults to the active target
        #[arg(long)]
        target: Option<String>,
    },
    /// Print the full evaluation context as JSON
    Context {
        #[command(flatten)]
        input: InputArgs,
    },
}
