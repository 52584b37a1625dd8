//! Search & Tree Filter
//!
//! Prunes a resolved value tree down to the parts matching a free-text query
//! while keeping the surrounding structure. Arrays collapse into index-keyed
//! objects. Traversal uses an explicit frame stack, so arbitrarily deep trees
//! do not grow the call stack.

use serde_json::{Map, Value};

/// Result of filtering a tree
#[derive(Debug, Clone, PartialEq)]
pub enum Filtered {
    /// The pruned tree
    Match(Value),
    /// Nothing matched; distinct from a source value that is an empty
    /// object or array
    NoMatch,
}

impl Filtered {
    pub fn is_match(&self) -> bool {
        matches!(self, Filtered::Match(_))
    }

    pub fn into_option(self) -> Option<Value> {
        match self {
            Filtered::Match(value) => Some(value),
            Filtered::NoMatch => None,
        }
    }
}

struct Frame<'a> {
    /// Key under which this frame's result lands in its parent
    key: Option<String>,
    children: std::vec::IntoIter<(String, &'a Value)>,
    matched: Map<String, Value>,
}

impl<'a> Frame<'a> {
    fn new(key: Option<String>, children: Vec<(String, &'a Value)>) -> Self {
        Self {
            key,
            children: children.into_iter(),
            matched: Map::new(),
        }
    }
}

/// Filter `value` down to entries matching `query`
///
/// An empty query returns the tree unchanged. A key containing the query
/// (case-sensitive) keeps its whole subtree; a scalar is kept when its string
/// form contains the query ignoring case. `null` matches as the text `null`.
///
/// Kept subtrees are copied without recursion. Dropping the result is left to
/// `serde_json`, which recurses once per nesting level.
pub fn filter(value: &Value, query: &str) -> Filtered {
    if query.is_empty() {
        return Filtered::Match(clone_tree(value));
    }
    let needle = query.to_lowercase();

    let Some(children) = entries(value) else {
        return if scalar_matches(value, &needle) {
            Filtered::Match(value.clone())
        } else {
            Filtered::NoMatch
        };
    };

    let mut stack = vec![Frame::new(None, children)];
    while let Some(frame) = stack.last_mut() {
        if let Some((key, child)) = frame.children.next() {
            if key.contains(query) {
                frame.matched.insert(key, clone_tree(child));
            } else if let Some(grandchildren) = entries(child) {
                stack.push(Frame::new(Some(key), grandchildren));
            } else if scalar_matches(child, &needle) {
                frame.matched.insert(key, child.clone());
            }
            continue;
        }

        let Some(Frame { key, matched, .. }) = stack.pop() else {
            break;
        };
        let result = if matched.is_empty() {
            Filtered::NoMatch
        } else {
            Filtered::Match(Value::Object(matched))
        };
        match (stack.last_mut(), key) {
            (Some(parent), Some(key)) => {
                if let Filtered::Match(value) = result {
                    parent.matched.insert(key, value);
                }
            }
            _ => return result,
        }
    }

    Filtered::NoMatch
}

/// Keyed children of a container; `None` for scalars
fn entries(value: &Value) -> Option<Vec<(String, &Value)>> {
    match value {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        _ => None,
    }
}

/// Container under construction while copying a tree
enum Built {
    Object(Map<String, Value>),
    Array(Vec<Value>),
}

impl Built {
    fn push(&mut self, key: Option<String>, value: Value) {
        match self {
            Built::Object(map) => {
                map.insert(key.unwrap_or_default(), value);
            }
            Built::Array(items) => items.push(value),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Built::Object(map) => Value::Object(map),
            Built::Array(items) => Value::Array(items),
        }
    }
}

struct CopyFrame<'a> {
    key: Option<String>,
    children: std::vec::IntoIter<(Option<String>, &'a Value)>,
    built: Built,
}

/// Empty copy of a container plus its children; `None` for scalars
fn open(value: &Value) -> Option<(Built, Vec<(Option<String>, &Value)>)> {
    match value {
        Value::Object(map) => Some((
            Built::Object(Map::new()),
            map.iter().map(|(k, v)| (Some(k.clone()), v)).collect(),
        )),
        Value::Array(items) => Some((
            Built::Array(Vec::with_capacity(items.len())),
            items.iter().map(|v| (None, v)).collect(),
        )),
        _ => None,
    }
}

/// Deep copy using an explicit frame stack
fn clone_tree(value: &Value) -> Value {
    let Some((built, children)) = open(value) else {
        return value.clone();
    };
    let mut stack = vec![CopyFrame {
        key: None,
        children: children.into_iter(),
        built,
    }];

    while let Some(frame) = stack.last_mut() {
        if let Some((key, child)) = frame.children.next() {
            match open(child) {
                Some((built, children)) => stack.push(CopyFrame {
                    key,
                    children: children.into_iter(),
                    built,
                }),
                None => frame.built.push(key, child.clone()),
            }
            continue;
        }

        let Some(CopyFrame { key, built, .. }) = stack.pop() else {
            break;
        };
        let value = built.into_value();
        match stack.last_mut() {
            Some(parent) => parent.built.push(key, value),
            None => return value,
        }
    }

    Value::Null
}

fn scalar_matches(value: &Value, needle: &str) -> bool {
    let text = match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.to_lowercase(),
        Value::Object(_) | Value::Array(_) => return false,
    };
    text.contains(needle)
}
