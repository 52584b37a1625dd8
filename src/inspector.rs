//! Inspector
//!
//! Runs the whole live-state pipeline for one pass: build (or reuse) the
//! evaluation context, synthesize query state, resolve widgets, transformers
//! and pages, assemble the target registry, and let the selection tracker pick
//! the active target. Every pass consumes only its declared inputs; the only
//! state carried between passes is the previous selection, the active target,
//! and the context memo.
//!
//! The widget layer of the context holds resolved bags, so a binding such as
//! `{{ input1.value }}` sees the value `input1` displays rather than its
//! template. Layering repeats until the bags stop changing, which settles
//! chains up to `MAX_WIDGET_LAYER_PASSES` widgets long.

use crate::config::{InspectorSettings, StatescopeConfig};
use crate::context::types::FIXED_KEYS;
use crate::context::{
    build_context, Context, ContextFingerprint, ContextInputs, QueryBinding, WidgetBinding,
};
use crate::document::{AppDocument, EditorState, Page, TransformerDescriptor};
use crate::error::InspectorError;
use crate::expression::{ExpressionResolver, TemplateResolver};
use crate::query::{synthesize_query_state, RunStatus};
use crate::search::{filter, Filtered};
use crate::targets::{
    merge_widget_trees, SelectionTracker, StateTarget, TargetGroup, TargetRegistry, TargetsByGroup,
};
use crate::widget::{PropertyResolver, WidgetInstance, WidgetTypeRegistry};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// Bound on context rebuilds while widget bags settle
pub const MAX_WIDGET_LAYER_PASSES: usize = 8;

/// Output of one pass, handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectorSnapshot {
    pub targets_by_group: TargetsByGroup,
    pub active_target: Option<String>,
    /// State of the active target; `null` when nothing is active
    pub resolved_state_tree: Value,
}

impl InspectorSnapshot {
    pub fn target(&self, id: &str) -> Option<&StateTarget> {
        self.targets_by_group
            .values()
            .flatten()
            .find(|target| target.id == id)
    }

    pub fn target_count(&self) -> usize {
        self.targets_by_group.values().map(Vec::len).sum()
    }

    /// Narrow the displayed tree to `query`
    pub fn search(&self, query: &str) -> Filtered {
        filter(&self.resolved_state_tree, query)
    }
}

pub struct Inspector {
    widget_types: WidgetTypeRegistry,
    resolver: Box<dyn ExpressionResolver>,
    settings: InspectorSettings,
    tracker: SelectionTracker,
    registry: TargetRegistry,
    memo: Option<(ContextFingerprint, Context)>,
    context_builds: u64,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(WidgetTypeRegistry::builtin(), Box::new(TemplateResolver))
    }
}

impl Inspector {
    pub fn new(widget_types: WidgetTypeRegistry, resolver: Box<dyn ExpressionResolver>) -> Self {
        Self {
            widget_types,
            resolver,
            settings: InspectorSettings::default(),
            tracker: SelectionTracker::new(),
            registry: TargetRegistry::new(),
            memo: None,
            context_builds: 0,
        }
    }

    /// Inspector using the configured widget catalogue and defaults
    pub fn from_config(config: &StatescopeConfig) -> Self {
        Self::new(config.widget_registry(), Box::new(TemplateResolver))
            .with_settings(config.inspector.clone())
    }

    pub fn with_settings(mut self, settings: InspectorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_tracker(mut self, tracker: SelectionTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    pub fn widget_types(&self) -> &WidgetTypeRegistry {
        &self.widget_types
    }

    /// Number of context builds that missed the memo
    pub fn context_builds(&self) -> u64 {
        self.context_builds
    }

    /// Declared inputs of the context for this pass
    pub fn context_inputs(&self, app: &AppDocument, editor: &EditorState) -> ContextInputs {
        self.inputs_for(app, editor, &merge_widget_trees(app.widget_trees()))
    }

    fn inputs_for(
        &self,
        app: &AppDocument,
        editor: &EditorState,
        widgets: &[&WidgetInstance],
    ) -> ContextInputs {
        self.warn_unknown_types(widgets);

        let running_queries: BTreeSet<String> = app
            .queries
            .iter()
            .filter(|q| {
                editor
                    .run_result(&q.id)
                    .is_some_and(|run| run.status == RunStatus::Running)
            })
            .map(|q| q.name.clone())
            .collect();

        ContextInputs {
            facts: editor.facts.clone(),
            default_environment: self.settings.default_environment.clone(),
            default_viewport: self.settings.default_viewport(),
            pages: app.page_refs(),
            running_queries,
            widgets: widgets
                .iter()
                .map(|w| {
                    WidgetBinding::from_instance(w, self.widget_types.spec_or_fallback(&w.widget_type))
                })
                .collect(),
            queries: app
                .queries
                .iter()
                .map(|q| QueryBinding::new(q, editor.run_result(&q.id)))
                .collect(),
            refresh_counter: editor.refresh_counter,
        }
    }

    /// Evaluation context for this pass, reused when the inputs are unchanged
    pub fn context(&mut self, app: &AppDocument, editor: &EditorState) -> Context {
        let widgets = merge_widget_trees(app.widget_trees());
        let inputs = self.inputs_for(app, editor, &widgets);
        self.memoized_context(&inputs, &widgets)
    }

    fn memoized_context(&mut self, inputs: &ContextInputs, widgets: &[&WidgetInstance]) -> Context {
        let fingerprint = inputs.fingerprint();
        if let Some((cached, context)) = &self.memo {
            if *cached == fingerprint {
                debug!(fingerprint = %fingerprint, "Context inputs unchanged; reusing context");
                return context.clone();
            }
        }
        let context = self.layered_context(inputs, widgets);
        self.context_builds += 1;
        self.memo = Some((fingerprint, context.clone()));
        context
    }

    /// Build the context, then replace the widget layer with resolved bags
    /// until it is stable
    fn layered_context(&self, inputs: &ContextInputs, widgets: &[&WidgetInstance]) -> Context {
        let mut layered = inputs.clone();
        let mut context = build_context(&layered);
        for pass in 1..=MAX_WIDGET_LAYER_PASSES {
            let bindings: Vec<WidgetBinding> = {
                let resolver = PropertyResolver::new(&context, self.resolver.as_ref());
                widgets
                    .iter()
                    .map(|w| {
                        let spec = self.widget_types.spec_or_fallback(&w.widget_type);
                        WidgetBinding::from_resolved(resolver.resolve(w, spec))
                    })
                    .collect()
            };
            if bindings == layered.widgets {
                debug!(passes = pass, "Widget layer settled");
                return context;
            }
            layered.widgets = bindings;
            context = build_context(&layered);
        }
        debug!(
            passes = MAX_WIDGET_LAYER_PASSES,
            "Widget layer still changing; using last pass"
        );
        context
    }

    /// Run one full pass
    pub fn rebuild(&mut self, app: &AppDocument, editor: &EditorState) -> InspectorSnapshot {
        let widgets = merge_widget_trees(app.widget_trees());
        let inputs = self.inputs_for(app, editor, &widgets);
        let context = self.memoized_context(&inputs, &widgets);

        let mut registry = TargetRegistry::new();
        registry.extend(FIXED_KEYS.iter().map(|key| {
            StateTarget::new(
                TargetGroup::Globals,
                key,
                *key,
                context.get(key).cloned().unwrap_or(Value::Null),
            )
        }));
        registry.extend(app.queries.iter().map(|query| {
            let state = synthesize_query_state(query, editor.run_result(&query.id));
            StateTarget::new(TargetGroup::Queries, &query.id, query.name.clone(), state.to_value())
        }));
        registry.extend(
            app.transformers
                .iter()
                .map(|transformer| self.transformer_target(transformer, &context)),
        );
        let active_page = editor.selection.active_page_id.as_deref();
        registry.extend(app.pages.iter().map(|page| page_target(page, active_page)));

        let resolver = PropertyResolver::new(&context, self.resolver.as_ref());
        for widget in widgets {
            let spec = self.widget_types.spec_or_fallback(&widget.widget_type);
            let resolved = resolver.resolve(widget, spec);
            registry.insert(StateTarget::new(
                TargetGroup::Widgets,
                &widget.id,
                widget.id.clone(),
                Value::Object(resolved.properties),
            ));
        }

        let active_target = self
            .tracker
            .observe(&editor.selection, &registry)
            .map(str::to_string);
        let resolved_state_tree = active_target
            .as_deref()
            .and_then(|id| registry.get(id))
            .map(|target| target.state.clone())
            .unwrap_or(Value::Null);

        debug!(
            targets = registry.len(),
            active_target = active_target.as_deref().unwrap_or("-"),
            "Inspector pass complete"
        );

        let snapshot = InspectorSnapshot {
            targets_by_group: registry.by_group(),
            active_target,
            resolved_state_tree,
        };
        self.registry = registry;
        snapshot
    }

    /// Activate a target from the last pass directly
    pub fn activate(&mut self, id: &str) -> Result<(), InspectorError> {
        if self.tracker.activate(id, &self.registry) {
            Ok(())
        } else {
            Err(InspectorError::TargetNotFound(id.to_string()))
        }
    }

    fn transformer_target(
        &self,
        transformer: &TransformerDescriptor,
        context: &Context,
    ) -> StateTarget {
        let value = match self.resolver.resolve(&transformer.source, context) {
            Ok(value) => value,
            Err(err) => {
                debug!(transformer = %transformer.id, error = %err, "Transformer did not resolve");
                Value::Null
            }
        };
        StateTarget::new(
            TargetGroup::Transformers,
            &transformer.id,
            transformer.name.clone(),
            json!({ "id": transformer.id, "name": transformer.name, "value": value }),
        )
    }

    fn warn_unknown_types(&self, widgets: &[&WidgetInstance]) {
        let mut reported = HashSet::new();
        for widget in widgets {
            let widget_type = widget.widget_type.as_str();
            if !self.widget_types.contains(widget_type) && reported.insert(widget_type) {
                warn!(widget_type, widget_id = %widget.id, "Unknown widget type; resolving without schema");
            }
        }
    }
}

fn page_target(page: &Page, active_page: Option<&str>) -> StateTarget {
    StateTarget::new(
        TargetGroup::Pages,
        &page.id,
        page.name.clone(),
        json!({
            "id": page.id,
            "name": page.name,
            "hidden": page.hidden,
            "isActive": active_page == Some(page.id.as_str()),
        }),
    )
}
