//! Target registry: one flattened, de-duplicated list of everything the
//! author can inspect, grouped by category. First-seen id wins.

use crate::widget::{flatten_trees, WidgetInstance};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use tracing::warn;

/// Target category, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetGroup {
    Globals,
    Queries,
    Transformers,
    Pages,
    Widgets,
}

impl TargetGroup {
    pub const ALL: [TargetGroup; 5] = [
        TargetGroup::Globals,
        TargetGroup::Queries,
        TargetGroup::Transformers,
        TargetGroup::Pages,
        TargetGroup::Widgets,
    ];

    /// Prefix of target ids in this group
    pub fn prefix(&self) -> &'static str {
        match self {
            TargetGroup::Globals => "global",
            TargetGroup::Queries => "query",
            TargetGroup::Transformers => "transformer",
            TargetGroup::Pages => "page",
            TargetGroup::Widgets => "widget",
        }
    }

    /// Wire name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetGroup::Globals => "globals",
            TargetGroup::Queries => "queries",
            TargetGroup::Transformers => "transformers",
            TargetGroup::Pages => "pages",
            TargetGroup::Widgets => "widgets",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TargetGroup::Globals => "Globals",
            TargetGroup::Queries => "Queries",
            TargetGroup::Transformers => "Transformers",
            TargetGroup::Pages => "Pages",
            TargetGroup::Widgets => "Components",
        }
    }
}

impl fmt::Display for TargetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Target id for an entity: `<group prefix>:<entity id>`
pub fn target_id(group: TargetGroup, entity_id: &str) -> String {
    format!("{}:{}", group.prefix(), entity_id)
}

/// One inspectable entity with its resolved state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTarget {
    pub id: String,
    pub label: String,
    pub group: TargetGroup,
    pub state: Value,
}

impl StateTarget {
    pub fn new(group: TargetGroup, entity_id: &str, label: impl Into<String>, state: Value) -> Self {
        Self {
            id: target_id(group, entity_id),
            label: label.into(),
            group,
            state,
        }
    }
}

/// Targets keyed by group, iterated in group order
pub type TargetsByGroup = BTreeMap<TargetGroup, Vec<StateTarget>>;

/// Ordered, de-duplicated target list
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<StateTarget>,
    index: HashMap<String, usize>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target unless its id is already present
    ///
    /// Returns `false` when the target was skipped as a duplicate.
    pub fn insert(&mut self, target: StateTarget) -> bool {
        if self.index.contains_key(&target.id) {
            warn!(target_id = %target.id, "Duplicate target id; keeping first occurrence");
            return false;
        }
        self.index.insert(target.id.clone(), self.targets.len());
        self.targets.push(target);
        true
    }

    pub fn get(&self, id: &str) -> Option<&StateTarget> {
        self.index.get(id).map(|&i| &self.targets[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn first(&self) -> Option<&StateTarget> {
        self.targets.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets grouped by category, insertion order within a group
    pub fn by_group(&self) -> TargetsByGroup {
        let mut grouped = TargetsByGroup::new();
        for target in &self.targets {
            grouped.entry(target.group).or_default().push(target.clone());
        }
        grouped
    }
}

impl Extend<StateTarget> for TargetRegistry {
    fn extend<I: IntoIterator<Item = StateTarget>>(&mut self, iter: I) {
        for target in iter {
            self.insert(target);
        }
    }
}

/// Flatten widget trees in order and keep the first instance of each id
pub fn merge_widget_trees<'a, I>(trees: I) -> Vec<&'a WidgetInstance>
where
    I: IntoIterator<Item = &'a [WidgetInstance]>,
{
    let mut seen = HashSet::new();
    flatten_trees(trees)
        .into_iter()
        .filter(|widget| {
            let first = seen.insert(widget.id.as_str());
            if !first {
                warn!(widget_id = %widget.id, "Duplicate widget id across trees; keeping first occurrence");
            }
            first
        })
        .collect()
}
