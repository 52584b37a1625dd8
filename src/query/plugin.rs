//! Mapping from query type discriminators to plugin type tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Plugin type tag exposed as `pluginType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginType {
    #[serde(rename = "RestQuery")]
    Rest,
    #[serde(rename = "GraphQLQuery")]
    GraphQl,
    #[serde(rename = "SqlQuery")]
    Sql,
    #[serde(rename = "JavascriptQuery")]
    Javascript,
    #[serde(rename = "MongoQuery")]
    Mongo,
    #[serde(rename = "S3Query")]
    S3,
    #[serde(rename = "GRPCQuery")]
    Grpc,
    #[serde(rename = "OpenAPIQuery")]
    OpenApi,
    #[serde(rename = "WorkflowRun")]
    Workflow,
    #[serde(rename = "Transformer")]
    Transformer,
    /// Fallback for unrecognized discriminators
    #[serde(rename = "GenericQuery")]
    Generic,
}

impl PluginType {
    /// Map a type discriminator (case-insensitive)
    pub fn from_discriminator(query_type: &str) -> Self {
        match query_type.trim().to_ascii_lowercase().as_str() {
            "rest" | "restapi" => PluginType::Rest,
            "graphql" => PluginType::GraphQl,
            "sql" => PluginType::Sql,
            "javascript" | "js" => PluginType::Javascript,
            "mongodb" | "mongo" => PluginType::Mongo,
            "s3" => PluginType::S3,
            "grpc" => PluginType::Grpc,
            "openapi" => PluginType::OpenApi,
            "workflow" => PluginType::Workflow,
            "transformer" => PluginType::Transformer,
            _ => PluginType::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PluginType::Rest => "RestQuery",
            PluginType::GraphQl => "GraphQLQuery",
            PluginType::Sql => "SqlQuery",
            PluginType::Javascript => "JavascriptQuery",
            PluginType::Mongo => "MongoQuery",
            PluginType::S3 => "S3Query",
            PluginType::Grpc => "GRPCQuery",
            PluginType::OpenApi => "OpenAPIQuery",
            PluginType::Workflow => "WorkflowRun",
            PluginType::Transformer => "Transformer",
            PluginType::Generic => "GenericQuery",
        }
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
