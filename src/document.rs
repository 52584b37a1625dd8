//! App document and editor-state snapshot
//!
//! The declared inputs of a rebuild: the app under construction (pages,
//! widget trees, queries, transformers) and the editor state observed at one
//! instant (selection, query run results, environment facts, the manual
//! refresh counter). Both load from JSON, or TOML when the file extension is
//! `.toml`.

use crate::context::{EnvironmentFacts, PageRef};
use crate::error::InspectorError;
use crate::query::{QueryDescriptor, QueryRunResult};
use crate::targets::Selection;
use crate::types::{PageId, QueryId};
use crate::widget::WidgetInstance;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    /// Page-scoped widget tree
    #[serde(default)]
    pub widgets: Vec<WidgetInstance>,
    /// Widgets pinned across the page (headers, sidebars)
    #[serde(default)]
    pub page_global_widgets: Vec<WidgetInstance>,
}

impl Page {
    pub fn page_ref(&self) -> PageRef {
        PageRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Transformer: a named expression evaluated against the context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub source: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDocument {
    #[serde(default)]
    pub pages: Vec<Page>,
    /// App-global widget tree, shared by every page
    #[serde(default)]
    pub global_widgets: Vec<WidgetInstance>,
    #[serde(default)]
    pub queries: Vec<QueryDescriptor>,
    #[serde(default)]
    pub transformers: Vec<TransformerDescriptor>,
}

impl AppDocument {
    pub fn load(path: &Path) -> Result<Self, InspectorError> {
        let document: Self = read_document(path)?;
        document.check()?;
        debug!(
            path = %path.display(),
            pages = document.pages.len(),
            queries = document.queries.len(),
            transformers = document.transformers.len(),
            "Loaded app document"
        );
        Ok(document)
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_refs(&self) -> Vec<PageRef> {
        self.pages.iter().map(Page::page_ref).collect()
    }

    /// Widget trees in merge order: app-global first, then for each page its
    /// page-global tree followed by its page-scoped tree
    pub fn widget_trees(&self) -> Vec<&[WidgetInstance]> {
        let mut trees = vec![self.global_widgets.as_slice()];
        for page in &self.pages {
            trees.push(page.page_global_widgets.as_slice());
            trees.push(page.widgets.as_slice());
        }
        trees
    }

    /// Reject documents whose entities cannot be addressed
    fn check(&self) -> Result<(), InspectorError> {
        let mut pages = HashSet::new();
        for page in &self.pages {
            if page.id.is_empty() {
                return Err(InspectorError::DocumentError("Page with empty id".to_string()));
            }
            if !pages.insert(page.id.as_str()) {
                return Err(InspectorError::DocumentError(format!(
                    "Duplicate page id '{}'",
                    page.id
                )));
            }
        }

        let mut queries = HashSet::new();
        for query in &self.queries {
            if query.id.is_empty() {
                return Err(InspectorError::DocumentError(format!(
                    "Query '{}' has an empty id",
                    query.name
                )));
            }
            if !queries.insert(query.id.as_str()) {
                return Err(InspectorError::DocumentError(format!(
                    "Duplicate query id '{}'",
                    query.id
                )));
            }
        }

        Ok(())
    }
}

/// Editor signals observed at one instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub query_results: BTreeMap<QueryId, QueryRunResult>,
    #[serde(default)]
    pub facts: EnvironmentFacts,
    #[serde(default)]
    pub refresh_counter: u64,
}

impl EditorState {
    pub fn load(path: &Path) -> Result<Self, InspectorError> {
        read_document(path)
    }

    pub fn run_result(&self, query_id: &str) -> Option<&QueryRunResult> {
        self.query_results.get(query_id)
    }
}

/// Read a JSON document, or TOML when the extension is `.toml`
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, InspectorError> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        Ok(toml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}
