//! Selection tracking
//!
//! Decides the active target from editor selection signals. The previous
//! selection is held here and compared on every pass; a changed selection is
//! applied before the first-target fallback so rapid selection changes never
//! flash an arbitrary target.

use super::registry::{target_id, TargetGroup, TargetRegistry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Editor selection signal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default)]
    pub widget_id: Option<String>,
    #[serde(default)]
    pub global_widget_id: Option<String>,
    #[serde(default)]
    pub page_component_selected: bool,
    #[serde(default)]
    pub active_page_id: Option<String>,
}

impl Selection {
    pub fn widget(widget_id: impl Into<String>) -> Self {
        Self {
            widget_id: Some(widget_id.into()),
            ..Default::default()
        }
    }

    pub fn on_page(mut self, page_id: impl Into<String>) -> Self {
        self.active_page_id = Some(page_id.into());
        self
    }
}

/// Target a selection points at
///
/// Global widget > widget > page component on the active page.
pub fn preferred_target(selection: &Selection) -> Option<String> {
    if let Some(id) = &selection.global_widget_id {
        return Some(target_id(TargetGroup::Widgets, id));
    }
    if let Some(id) = &selection.widget_id {
        return Some(target_id(TargetGroup::Widgets, id));
    }
    match (&selection.active_page_id, selection.page_component_selected) {
        (Some(page_id), true) => Some(target_id(TargetGroup::Pages, page_id)),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    NoActiveTarget,
    ActiveTarget(String),
}

/// Active-target state machine
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    previous: Option<Selection>,
    state: SelectionState,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker that already observed `previous`
    pub fn with_previous(previous: Selection) -> Self {
        Self {
            previous: Some(previous),
            state: SelectionState::NoActiveTarget,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn previous(&self) -> Option<&Selection> {
        self.previous.as_ref()
    }

    pub fn active_id(&self) -> Option<&str> {
        match &self.state {
            SelectionState::ActiveTarget(id) => Some(id),
            SelectionState::NoActiveTarget => None,
        }
    }

    /// Apply one pass of selection input against the current targets
    pub fn observe(&mut self, selection: &Selection, targets: &TargetRegistry) -> Option<&str> {
        if let SelectionState::ActiveTarget(id) = &self.state {
            if !targets.contains(id) {
                debug!(target_id = %id, "Active target disappeared");
                self.state = SelectionState::NoActiveTarget;
            }
        }

        if self.previous.as_ref() != Some(selection) {
            self.previous = Some(selection.clone());
            match preferred_target(selection) {
                Some(id) if targets.contains(&id) => {
                    debug!(target_id = %id, "Selection changed active target");
                    self.state = SelectionState::ActiveTarget(id);
                }
                Some(id) => debug!(target_id = %id, "Selected target not registered"),
                None => {}
            }
        }

        if self.state == SelectionState::NoActiveTarget {
            if let Some(first) = targets.first() {
                self.state = SelectionState::ActiveTarget(first.id.clone());
            }
        }

        self.active_id()
    }

    /// Activate a target picked directly in the inspector
    pub fn activate(&mut self, id: &str, targets: &TargetRegistry) -> bool {
        if !targets.contains(id) {
            return false;
        }
        self.state = SelectionState::ActiveTarget(id.to_string());
        true
    }
}
