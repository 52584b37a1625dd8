//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the inspector.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, InputArgs};
pub use presentation::{
    format_context_output, format_search_output, format_state_json, format_state_text,
    format_targets_json, format_targets_text,
};
pub use route::RunContext;
