//! Field schemas: the resolved-value kinds a widget field accepts.

use crate::types::ValueKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Declared constraints for one widget field
///
/// An empty `allowed` set accepts any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub key: String,
    #[serde(default)]
    pub allowed: BTreeSet<ValueKind>,
}

impl FieldSchema {
    pub fn new(key: impl Into<String>, allowed: &[ValueKind]) -> Self {
        Self {
            key: key.into(),
            allowed: allowed.iter().copied().collect(),
        }
    }

    /// Schema accepting any kind
    pub fn any(key: impl Into<String>) -> Self {
        Self::new(key, &[])
    }

    pub fn accepts(&self, kind: ValueKind) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&kind)
    }

    /// Boolean fields that may be left unset encode "unset" as `""`
    pub fn is_optional_boolean(&self) -> bool {
        self.allowed.contains(&ValueKind::Boolean) && self.allowed.contains(&ValueKind::Undefined)
    }
}

/// Find the schema for a field key
pub fn find<'a>(fields: &'a [FieldSchema], key: &str) -> Option<&'a FieldSchema> {
    fields.iter().find(|f| f.key == key)
}
