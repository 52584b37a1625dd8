//! Query descriptors and run results as supplied by the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared query
///
/// `config` is the sparse declarative configuration; it may be absent or
/// carry only some of the `response` / `advanced` sub-sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub id: String,
    pub name: String,
    /// Type discriminator, e.g. `rest`, `sql`, `javascript`
    #[serde(rename = "type", default)]
    pub query_type: String,
    #[serde(default)]
    pub config: Option<Value>,
}

impl QueryDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, query_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            query_type: query_type.into(),
            config: None,
        }
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// Run status reported by the query result provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Success,
    Error,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Success => "success",
            RunStatus::Error => "error",
        }
    }
}

/// Latest run result for one query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRunResult {
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
}

impl QueryRunResult {
    pub fn running() -> Self {
        Self {
            status: RunStatus::Running,
            ..Default::default()
        }
    }

    pub fn success(data: Value, received_at: DateTime<Utc>) -> Self {
        Self {
            status: RunStatus::Success,
            data: Some(data),
            error: None,
            received_at: Some(received_at),
        }
    }

    pub fn failure(error: impl Into<String>, received_at: DateTime<Utc>) -> Self {
        Self {
            status: RunStatus::Error,
            data: None,
            error: Some(error.into()),
            received_at: Some(received_at),
        }
    }
}
