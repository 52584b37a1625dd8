//! Target domain: the de-duplicated registry of inspectable entities and the
//! selection tracker deciding which one is active.

pub mod registry;
pub mod selection;

pub use registry::{
    merge_widget_trees, target_id, StateTarget, TargetGroup, TargetRegistry, TargetsByGroup,
};
pub use selection::{preferred_target, Selection, SelectionState, SelectionTracker};
