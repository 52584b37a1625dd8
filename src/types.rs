//! Shared value types used across context, resolution and targets.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Widget identifier, unique across every merged widget tree
pub type WidgetId = String;

/// Query identifier
pub type QueryId = String;

/// Page identifier
pub type PageId = String;

/// Runtime kind of a resolved value
///
/// `Undefined` has no JSON encoding: it describes a resolution that produced
/// no value at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Undefined,
    Null,
}

impl ValueKind {
    /// Kind of a present value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Kind of a value that may be absent
    pub fn of_optional(value: Option<&Value>) -> Self {
        value.map(ValueKind::of).unwrap_or(ValueKind::Undefined)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
