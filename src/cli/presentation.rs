//! CLI presentation: text and json formatters per command family.

mod state;
mod targets;

pub use state::{
    format_context_output, format_search_output, format_state_json, format_state_text,
};
pub use targets::{format_targets_json, format_targets_text};
