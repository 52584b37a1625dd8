//! Error types for the Statescope live state inspector.

use thiserror::Error;

/// Expression resolution errors
///
/// These never cross the property resolver boundary: a field whose resolution
/// fails is omitted from the snapshot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The expression evaluated to `undefined` (unknown name or missing member)
    #[error("Undefined reference: {0}")]
    Undefined(String),

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Type error: {0}")]
    Type(String),
}

/// Errors surfaced at the outer boundary: configuration, documents, CLI
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid document: {0}")]
    DocumentError(String),

    #[error("Target not found: {0}")]
    TargetNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<config::ConfigError> for InspectorError {
    fn from(err: config::ConfigError) -> Self {
        InspectorError::ConfigError(err.to_string())
    }
}
