//! Context Builder
//!
//! Assembles the evaluation context from environment facts, the flattened
//! widget namespace, and the flattened query namespace. `build_context` is a
//! pure function of `ContextInputs`; callers memoize on
//! `ContextInputs::fingerprint`, which also covers the manual refresh counter.

use super::environment::{EnvironmentFacts, PageRef, Viewport};
use super::types::{
    Context, KEY_APP, KEY_COMPONENTS, KEY_CURRENT_USER, KEY_LOCAL_STORAGE, KEY_QUERIES, KEY_THEME,
    KEY_URL_PARAMS, KEY_VIEWPORT,
};
use crate::query::{QueryDescriptor, QueryRunResult, RunSnapshot};
use crate::types::{QueryId, WidgetId};
use crate::widget::{ResolvedWidget, WidgetInstance, WidgetTypeSpec};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Widget-id → value-bag entry of the widget layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetBinding {
    pub id: WidgetId,
    pub values: Map<String, Value>,
}

impl WidgetBinding {
    /// Type defaults overlaid by the instance's raw bag
    pub fn from_instance(instance: &WidgetInstance, spec: &WidgetTypeSpec) -> Self {
        let mut values = spec.defaults.clone();
        for (key, value) in &instance.properties {
            values.insert(key.clone(), value.clone());
        }
        Self {
            id: instance.id.clone(),
            values,
        }
    }

    /// Resolved property bag of a widget, as other bindings should see it
    pub fn from_resolved(resolved: ResolvedWidget) -> Self {
        Self {
            id: resolved.id,
            values: resolved.properties,
        }
    }
}

/// Query-id/name → projection entry of the query layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryBinding {
    pub id: QueryId,
    pub name: String,
    pub projection: Value,
}

impl QueryBinding {
    pub fn new(descriptor: &QueryDescriptor, run: Option<&QueryRunResult>) -> Self {
        Self {
            id: descriptor.id.clone(),
            name: descriptor.name.clone(),
            projection: RunSnapshot::from_result(run).projection(),
        }
    }
}

/// Every declared input of a context build
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInputs {
    pub facts: EnvironmentFacts,
    /// Used when the facts carry no environment label
    pub default_environment: String,
    /// Used when the facts carry no viewport
    pub default_viewport: Viewport,
    pub pages: Vec<PageRef>,
    pub running_queries: BTreeSet<String>,
    pub widgets: Vec<WidgetBinding>,
    pub queries: Vec<QueryBinding>,
    pub refresh_counter: u64,
}

impl Default for ContextInputs {
    fn default() -> Self {
        Self {
            facts: EnvironmentFacts::default(),
            default_environment: DEFAULT_ENVIRONMENT.to_string(),
            default_viewport: Viewport::default(),
            pages: Vec::new(),
            running_queries: BTreeSet::new(),
            widgets: Vec::new(),
            queries: Vec::new(),
            refresh_counter: 0,
        }
    }
}

impl ContextInputs {
    /// Digest of the canonical serialization of every input
    pub fn fingerprint(&self) -> ContextFingerprint {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        ContextFingerprint(*blake3::hash(&bytes).as_bytes())
    }
}

/// Memo key for context builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextFingerprint([u8; 32]);

impl ContextFingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ContextFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Build the evaluation context
///
/// Root precedence, lowest first: widget layer, query layer by id, query
/// layer by name, the `components` / `queries` namespaces, fixed keys.
pub fn build_context(inputs: &ContextInputs) -> Context {
    let mut root = Map::new();

    let mut components = Map::new();
    for widget in &inputs.widgets {
        let bag = Value::Object(widget.values.clone());
        root.insert(widget.id.clone(), bag.clone());
        components.insert(widget.id.clone(), bag);
    }

    let mut queries = Map::new();
    for query in &inputs.queries {
        root.insert(query.id.clone(), query.projection.clone());
        queries.insert(query.id.clone(), query.projection.clone());
    }
    for query in &inputs.queries {
        root.insert(query.name.clone(), query.projection.clone());
    }

    root.insert(KEY_COMPONENTS.to_string(), Value::Object(components));
    root.insert(KEY_QUERIES.to_string(), Value::Object(queries));

    let facts = &inputs.facts;
    root.insert(
        KEY_CURRENT_USER.to_string(),
        facts.current_user.clone().unwrap_or(Value::Null),
    );
    root.insert(
        KEY_LOCAL_STORAGE.to_string(),
        Value::Object(facts.local_storage.clone().unwrap_or_default()),
    );
    root.insert(KEY_URL_PARAMS.to_string(), url_params(facts));
    root.insert(
        KEY_THEME.to_string(),
        Value::Object(
            facts
                .theme
                .iter()
                .flatten()
                .map(|(token, color)| (token.clone(), Value::String(color.clone())))
                .collect(),
        ),
    );
    let viewport = facts.viewport.unwrap_or(inputs.default_viewport);
    root.insert(
        KEY_VIEWPORT.to_string(),
        json!({ "width": viewport.width, "height": viewport.height }),
    );
    root.insert(KEY_APP.to_string(), app_facts(inputs));

    debug!(
        widgets = inputs.widgets.len(),
        queries = inputs.queries.len(),
        refresh_counter = inputs.refresh_counter,
        keys = root.len(),
        "Built evaluation context"
    );

    Context::from_map(root)
}

/// Query-string entries plus a `hash` key holding the fragment entries
fn url_params(facts: &EnvironmentFacts) -> Value {
    let Some(location) = facts.location.as_ref() else {
        return json!({ "hash": {} });
    };
    let mut params: Map<String, Value> = location
        .query
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    let hash: Map<String, Value> = location
        .hash
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    params.insert("hash".to_string(), Value::Object(hash));
    Value::Object(params)
}

fn app_facts(inputs: &ContextInputs) -> Value {
    let environment = inputs
        .facts
        .environment
        .clone()
        .unwrap_or_else(|| inputs.default_environment.clone());
    let pages: Vec<Value> = inputs
        .pages
        .iter()
        .map(|p| json!({ "id": p.id, "name": p.name }))
        .collect();
    json!({
        "environment": environment,
        "pages": pages,
        "runningQueries": inputs.running_queries.iter().collect::<Vec<_>>(),
    })
}
