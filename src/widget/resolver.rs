//! Widget Property Resolution
//!
//! Evaluates a widget's raw property bag against the evaluation context,
//! applies the unset-boolean coercion, validates each field against its
//! declared kinds, and layers the result over the type defaults. Every field
//! is resolved in isolation: a failure omits that field and nothing else.

use super::instance::WidgetInstance;
use super::schema::{self, FieldSchema};
use super::types::WidgetTypeSpec;
use crate::context::Context;
use crate::error::ResolveError;
use crate::expression::{truthy, ExpressionResolver};
use crate::types::{ValueKind, WidgetId};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

/// Derived keys written over the merged properties
pub const KEY_MARGIN: &str = "margin";
pub const KEY_HEIGHT_MODE: &str = "heightMode";
pub const KEY_HIDDEN: &str = "hidden";
pub const KEY_DISABLED: &str = "disabled";
pub const KEY_VISIBLE: &str = "visible";

/// Outcome of resolving a raw property bag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldResolution {
    /// Fields that resolved, after coercion and validation
    pub resolved: Map<String, Value>,
    /// Fields omitted because resolution failed, produced `undefined`, or
    /// failed validation
    pub omitted: BTreeSet<String>,
}

/// Resolve every field of a raw property bag
pub fn resolve_fields(
    raw: &Map<String, Value>,
    fields: &[FieldSchema],
    context: &Context,
    resolver: &dyn ExpressionResolver,
) -> FieldResolution {
    let mut out = FieldResolution::default();

    for (key, raw_value) in raw {
        let field = schema::find(fields, key);

        let value = match resolver.resolve(raw_value, context) {
            Ok(value) => Some(value),
            Err(ResolveError::Undefined(_)) => None,
            Err(err) => {
                debug!(field = %key, error = %err, "Field resolution failed; omitting");
                out.omitted.insert(key.clone());
                continue;
            }
        };

        let value = match (value, field) {
            (Some(Value::String(s)), Some(f)) if s.is_empty() && f.is_optional_boolean() => {
                Some(Value::Bool(false))
            }
            (value, _) => value,
        };

        let kind = ValueKind::of_optional(value.as_ref());
        if let Some(f) = field {
            if !f.accepts(kind) {
                debug!(field = %key, kind = %kind, "Resolved kind not allowed; dropping field");
                out.omitted.insert(key.clone());
                continue;
            }
        }

        match value {
            Some(value) => {
                out.resolved.insert(key.clone(), value);
            }
            None => {
                out.omitted.insert(key.clone());
            }
        }
    }

    out
}

/// Resolved snapshot of one widget
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedWidget {
    pub id: WidgetId,
    pub widget_type: String,
    pub properties: Map<String, Value>,
    #[serde(skip)]
    pub omitted: BTreeSet<String>,
}

impl ResolvedWidget {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn is_hidden(&self) -> bool {
        self.properties
            .get(KEY_HIDDEN)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Resolves widget instances against one context
pub struct PropertyResolver<'a> {
    context: &'a Context,
    resolver: &'a dyn ExpressionResolver,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(context: &'a Context, resolver: &'a dyn ExpressionResolver) -> Self {
        Self { context, resolver }
    }

    /// Resolve one instance using its type's defaults and field schemas
    pub fn resolve(&self, instance: &WidgetInstance, spec: &WidgetTypeSpec) -> ResolvedWidget {
        let FieldResolution { resolved, omitted } =
            resolve_fields(&instance.properties, &spec.fields, self.context, self.resolver);

        if !omitted.is_empty() {
            debug!(
                widget_id = %instance.id,
                omitted = omitted.len(),
                "Widget resolved with omitted fields"
            );
        }

        let mut properties = spec.defaults.clone();
        for (key, raw) in &instance.properties {
            if !omitted.contains(key) {
                properties.insert(key.clone(), raw.clone());
            }
        }
        properties.extend(resolved);

        let spacing = instance.spacing.as_ref();
        let margin = spacing
            .and_then(|s| s.margin.clone())
            .unwrap_or_else(|| spec.margin.clone());
        let height_mode = spacing
            .and_then(|s| s.height_mode)
            .unwrap_or(spec.height_mode);

        properties.insert(KEY_MARGIN.to_string(), Value::String(margin));
        properties.insert(
            KEY_HEIGHT_MODE.to_string(),
            Value::String(height_mode.as_str().to_string()),
        );
        properties.insert(
            KEY_HIDDEN.to_string(),
            Value::Bool(self.flag(instance.hidden.as_ref(), false)),
        );
        properties.insert(
            KEY_DISABLED.to_string(),
            Value::Bool(self.flag(instance.disabled.as_ref(), false)),
        );
        properties.insert(
            KEY_VISIBLE.to_string(),
            Value::Bool(self.flag(instance.visible.as_ref(), true)),
        );

        ResolvedWidget {
            id: instance.id.clone(),
            widget_type: instance.widget_type.clone(),
            properties,
            omitted,
        }
    }

    /// Evaluate an optional boolean expression; failures yield `default`
    fn flag(&self, expression: Option<&Value>, default: bool) -> bool {
        match expression {
            None => default,
            Some(raw) => self
                .resolver
                .resolve(raw, self.context)
                .map(|v| truthy(&v))
                .unwrap_or(default),
        }
    }
}
