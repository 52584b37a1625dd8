//! Widget instances and tree flattening.

use crate::types::WidgetId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Height behaviour of a widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightMode {
    #[default]
    Fixed,
    Auto,
}

impl HeightMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightMode::Fixed => "fixed",
            HeightMode::Auto => "auto",
        }
    }
}

/// Per-instance layout overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingOverride {
    #[serde(default)]
    pub margin: Option<String>,
    #[serde(default)]
    pub height_mode: Option<HeightMode>,
}

/// One widget in a page or global tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInstance {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub widget_type: String,
    #[serde(default)]
    pub children: Vec<WidgetInstance>,
    /// Raw literal-or-expression values keyed by field
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub hidden: Option<Value>,
    #[serde(default)]
    pub disabled: Option<Value>,
    #[serde(default)]
    pub visible: Option<Value>,
    #[serde(default)]
    pub spacing: Option<SpacingOverride>,
}

impl WidgetInstance {
    pub fn new(id: impl Into<String>, widget_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            widget_type: widget_type.into(),
            children: Vec::new(),
            properties: Map::new(),
            hidden: None,
            disabled: None,
            visible: None,
            spacing: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn with_child(mut self, child: WidgetInstance) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_hidden(mut self, expression: Value) -> Self {
        self.hidden = Some(expression);
        self
    }
}

impl Drop for WidgetInstance {
    /// Detach descendants onto a work list so deep trees drop without recursion
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut widget) = pending.pop() {
            pending.append(&mut widget.children);
        }
    }
}

/// Flatten widget trees pre-order, in tree order
///
/// Uses an explicit stack so arbitrarily deep trees cannot exhaust the call
/// stack. Duplicates are kept; de-duplication is the target registry's job.
pub fn flatten_trees<'a, I>(trees: I) -> Vec<&'a WidgetInstance>
where
    I: IntoIterator<Item = &'a [WidgetInstance]>,
{
    let mut out = Vec::new();
    for roots in trees {
        let mut stack: Vec<&WidgetInstance> = roots.iter().rev().collect();
        while let Some(widget) = stack.pop() {
            out.push(widget);
            stack.extend(widget.children.iter().rev());
        }
    }
    out
}
