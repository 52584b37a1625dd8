//! The evaluation context: a name → value mapping expressions are resolved against.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fixed top-level context keys. These are written last and never shadowed.
pub const KEY_CURRENT_USER: &str = "currentUser";
pub const KEY_LOCAL_STORAGE: &str = "localStorage";
pub const KEY_URL_PARAMS: &str = "urlparams";
pub const KEY_THEME: &str = "theme";
pub const KEY_VIEWPORT: &str = "viewport";
pub const KEY_APP: &str = "app";

/// Namespaced copies of the flattened layers
pub const KEY_COMPONENTS: &str = "components";
pub const KEY_QUERIES: &str = "queries";

/// Fixed keys in display order
pub const FIXED_KEYS: [&str; 6] = [
    KEY_CURRENT_USER,
    KEY_LOCAL_STORAGE,
    KEY_URL_PARAMS,
    KEY_THEME,
    KEY_VIEWPORT,
    KEY_APP,
];

/// Evaluation context
///
/// Rebuilt from scratch on every pass; there is no mutation API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    pub(crate) fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Look up a root name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The whole context as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}
