//! Target list presentation.

use crate::error::InspectorError;
use crate::inspector::InspectorSnapshot;
use comfy_table::Table;
use serde_json::{json, Map, Value};

pub fn format_targets_text(snapshot: &InspectorSnapshot) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["", "Group", "Target", "Label"]);

    let active = snapshot.active_target.as_deref();
    for (group, targets) in &snapshot.targets_by_group {
        for target in targets {
            let marker = if active == Some(target.id.as_str()) { "*" } else { "" };
            table.add_row(vec![marker, group.title(), target.id.as_str(), target.label.as_str()]);
        }
    }

    format!(
        "{}\n{} targets, active: {}",
        table,
        snapshot.target_count(),
        active.unwrap_or("none")
    )
}

pub fn format_targets_json(snapshot: &InspectorSnapshot) -> Result<String, InspectorError> {
    let mut groups = Map::new();
    for (group, targets) in &snapshot.targets_by_group {
        let entries: Vec<Value> = targets
            .iter()
            .map(|t| json!({ "id": t.id, "label": t.label }))
            .collect();
        groups.insert(group.as_str().to_string(), Value::Array(entries));
    }
    let out = json!({
        "activeTarget": snapshot.active_target,
        "targetsByGroup": groups,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}
