//! Widget type registry
//!
//! Each widget type declares a default property bag, field schemas, and
//! layout defaults. The registry ships a built-in catalogue; configuration can
//! add or replace types.

use super::instance::HeightMode;
use super::schema::FieldSchema;
use crate::types::ValueKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

pub const DEFAULT_MARGIN: &str = "4px 8px";

fn default_margin() -> String {
    DEFAULT_MARGIN.to_string()
}

/// Declaration of one widget type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetTypeSpec {
    #[serde(default)]
    pub defaults: Map<String, Value>,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    #[serde(default = "default_margin")]
    pub margin: String,
    /// `height_mode` is accepted alongside `heightMode` in config files
    #[serde(default, alias = "height_mode")]
    pub height_mode: HeightMode,
}

impl Default for WidgetTypeSpec {
    fn default() -> Self {
        Self {
            defaults: Map::new(),
            fields: Vec::new(),
            margin: default_margin(),
            height_mode: HeightMode::Fixed,
        }
    }
}

impl WidgetTypeSpec {
    fn declare(defaults: Value, fields: &[(&str, &[ValueKind])]) -> Self {
        Self {
            defaults: match defaults {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            fields: fields
                .iter()
                .map(|(key, kinds)| FieldSchema::new(*key, kinds))
                .collect(),
            ..Self::default()
        }
    }

    fn margin(mut self, margin: &str) -> Self {
        self.margin = margin.to_string();
        self
    }

    fn auto_height(mut self) -> Self {
        self.height_mode = HeightMode::Auto;
        self
    }

    /// Validate a spec; returns a description of the first problem
    pub fn validate(&self) -> Result<(), String> {
        if self.margin.trim().is_empty() {
            return Err("margin cannot be empty".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if field.key.is_empty() {
                return Err("field key cannot be empty".to_string());
            }
            if !seen.insert(field.key.as_str()) {
                return Err(format!("duplicate field schema '{}'", field.key));
            }
        }
        Ok(())
    }
}

/// Registry of widget types by type tag
#[derive(Debug, Clone)]
pub struct WidgetTypeRegistry {
    types: HashMap<String, WidgetTypeSpec>,
    fallback: WidgetTypeSpec,
}

impl Default for WidgetTypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WidgetTypeRegistry {
    /// Registry with no declared types
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
            fallback: WidgetTypeSpec::default(),
        }
    }

    /// Registry with the built-in widget catalogue
    pub fn builtin() -> Self {
        use ValueKind::*;

        let mut registry = Self::empty();
        registry.register(
            "button",
            WidgetTypeSpec::declare(
                json!({"text": "Button", "loading": false, "tooltip": ""}),
                &[
                    ("text", &[String, Number]),
                    ("loading", &[Boolean, Undefined]),
                    ("tooltip", &[String]),
                ],
            ),
        );
        registry.register(
            "text",
            WidgetTypeSpec::declare(
                json!({"value": "", "markdown": true}),
                &[("value", &[String, Number, Boolean, Null]), ("markdown", &[Boolean])],
            )
            .auto_height(),
        );
        registry.register(
            "textInput",
            WidgetTypeSpec::declare(
                json!({"value": "", "placeholder": "", "label": "", "required": false}),
                &[
                    ("value", &[String, Number]),
                    ("placeholder", &[String]),
                    ("label", &[String]),
                    ("required", &[Boolean, Undefined]),
                ],
            ),
        );
        for checkable in ["checkbox", "switch"] {
            registry.register(
                checkable,
                WidgetTypeSpec::declare(
                    json!({"value": false, "label": ""}),
                    &[("value", &[Boolean, Undefined]), ("label", &[String])],
                ),
            );
        }
        registry.register(
            "select",
            WidgetTypeSpec::declare(
                json!({"value": null, "options": [], "placeholder": "Select an option"}),
                &[("value", &[]), ("options", &[Array]), ("placeholder", &[String])],
            ),
        );
        registry.register(
            "table",
            WidgetTypeSpec::declare(
                json!({"data": [], "columns": [], "selectedRow": null, "pageSize": 10}),
                &[
                    ("data", &[Array]),
                    ("columns", &[Array]),
                    ("selectedRow", &[Object, Null, Undefined]),
                    ("pageSize", &[Number]),
                ],
            ),
        );
        registry.register(
            "container",
            WidgetTypeSpec::declare(
                json!({"showBorder": true, "backgroundColor": ""}),
                &[("showBorder", &[Boolean, Undefined]), ("backgroundColor", &[String])],
            )
            .margin("0px")
            .auto_height(),
        );
        registry.register(
            "modal",
            WidgetTypeSpec::declare(
                json!({"title": "", "open": false}),
                &[("title", &[String]), ("open", &[Boolean, Undefined])],
            )
            .margin("0px"),
        );
        registry.register(
            "image",
            WidgetTypeSpec::declare(
                json!({"src": "", "altText": ""}),
                &[("src", &[String]), ("altText", &[String])],
            ),
        );
        registry
    }

    /// Register or replace a widget type
    pub fn register(&mut self, widget_type: impl Into<String>, spec: WidgetTypeSpec) {
        self.types.insert(widget_type.into(), spec);
    }

    /// Merge configured widget types over the current catalogue
    pub fn extend<I>(&mut self, specs: I)
    where
        I: IntoIterator<Item = (String, WidgetTypeSpec)>,
    {
        for (name, spec) in specs {
            self.register(name, spec);
        }
    }

    pub fn get(&self, widget_type: &str) -> Option<&WidgetTypeSpec> {
        self.types.get(widget_type)
    }

    /// Spec for a type, or the empty fallback spec for unknown types
    pub fn spec_or_fallback(&self, widget_type: &str) -> &WidgetTypeSpec {
        self.types.get(widget_type).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, widget_type: &str) -> bool {
        self.types.contains_key(widget_type)
    }

    /// Registered type tags, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
