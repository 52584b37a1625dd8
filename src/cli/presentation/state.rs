//! State presentation: resolved target state, search results, and the context.

use crate::context::Context;
use crate::error::InspectorError;
use crate::search::Filtered;
use crate::targets::StateTarget;
use owo_colors::OwoColorize;

pub fn format_state_text(target: &StateTarget, active: bool) -> Result<String, InspectorError> {
    let mut title = format!("{} ({})", target.label, target.id);
    if active {
        title.push_str(" [active]");
    }
    Ok(format!(
        "{}\n{}",
        title.bold().underline(),
        serde_json::to_string_pretty(&target.state)?
    ))
}

pub fn format_state_json(target: &StateTarget) -> Result<String, InspectorError> {
    Ok(serde_json::to_string_pretty(target)?)
}

pub fn format_search_output(result: Filtered, query: &str) -> Result<String, InspectorError> {
    match result {
        Filtered::Match(tree) => Ok(serde_json::to_string_pretty(&tree)?),
        Filtered::NoMatch => Ok(format!("No matches for \"{}\"", query)),
    }
}

pub fn format_context_output(context: &Context) -> Result<String, InspectorError> {
    Ok(serde_json::to_string_pretty(context)?)
}
