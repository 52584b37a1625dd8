//! Widget type tables read straight from the TOML config files
//!
//! The `config` crate lowercases map keys, which would fold type tags such as
//! `datePicker` and default-bag keys such as `selectedDate`. The
//! `[widget_types]` section is therefore deserialized with `toml` from each
//! file, later files replacing earlier declarations of the same type.

use crate::error::InspectorError;
use crate::widget::WidgetTypeSpec;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct WidgetTypesSection {
    #[serde(default)]
    widget_types: HashMap<String, WidgetTypeSpec>,
}

/// Merge the `[widget_types]` tables of `paths`, lowest precedence first
pub fn load(paths: &[PathBuf]) -> Result<HashMap<String, WidgetTypeSpec>, InspectorError> {
    let mut types = HashMap::new();
    for path in paths {
        let text = std::fs::read_to_string(path)?;
        let section: WidgetTypesSection = toml::from_str(&text).map_err(|e| {
            InspectorError::ConfigError(format!("{}: {}", path.display(), e))
        })?;
        debug!(
            config_path = %path.display(),
            widget_types = section.widget_types.len(),
            "Read widget types"
        );
        types.extend(section.widget_types);
    }
    Ok(types)
}
