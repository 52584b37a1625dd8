//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::InspectorError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &InspectorError) -> String {
    match e {
        InspectorError::TargetNotFound(id) => {
            format!("Target not found: {} (run `statescope targets` to list ids)", id)
        }
        other => other.to_string(),
    }
}
