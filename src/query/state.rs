//! Query State Synthesis
//!
//! Turns one query descriptor plus its latest run result into a flat,
//! fully-defaulted state record. Synthesis is total: any descriptor, however
//! sparse its configuration, produces a record with every field populated.

use super::descriptor::{QueryDescriptor, QueryRunResult, RunStatus};
use super::plugin::PluginType;
use super::settings::{AdvancedSettings, QuerySettings, ResponseSettings};
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{json, Value};

/// Data payload of a query that has not produced a result yet
pub fn empty_payload() -> Value {
    json!({ "data": null, "error": null, "statusCode": null })
}

/// Run-derived part of a query's state
///
/// Shared by the state record and the context's query projection so both
/// expose the same defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub data: Value,
    pub error: Value,
    pub status: RunStatus,
    pub is_fetching: bool,
    pub received_at: Value,
}

impl RunSnapshot {
    pub fn from_result(run: Option<&QueryRunResult>) -> Self {
        let Some(run) = run else {
            return Self {
                data: empty_payload(),
                error: Value::Null,
                status: RunStatus::Idle,
                is_fetching: false,
                received_at: Value::Null,
            };
        };

        Self {
            data: run.data.clone().unwrap_or_else(empty_payload),
            error: run
                .error
                .as_ref()
                .map(|e| Value::String(e.clone()))
                .unwrap_or(Value::Null),
            status: run.status,
            is_fetching: run.status == RunStatus::Running,
            received_at: run
                .received_at
                .map(|ts| Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true)))
                .unwrap_or(Value::Null),
        }
    }

    /// Projection bound into the evaluation context
    pub fn projection(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| empty_payload())
    }
}

/// Synthesized query state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub id: String,
    pub name: String,
    pub query_type: String,
    pub plugin_type: PluginType,
    #[serde(flatten)]
    pub run: RunSnapshot,
    #[serde(flatten)]
    pub response: ResponseSettings,
    #[serde(flatten)]
    pub advanced: AdvancedSettings,
}

impl QueryState {
    /// Flat JSON record
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Synthesize the state record for one query
pub fn synthesize_query_state(
    descriptor: &QueryDescriptor,
    run: Option<&QueryRunResult>,
) -> QueryState {
    let QuerySettings { response, advanced } =
        QuerySettings::from_config(descriptor.config.as_ref());

    QueryState {
        id: descriptor.id.clone(),
        name: descriptor.name.clone(),
        query_type: descriptor.query_type.clone(),
        plugin_type: PluginType::from_discriminator(&descriptor.query_type),
        run: RunSnapshot::from_result(run),
        response,
        advanced,
    }
}
