//! Configuration System
//!
//! Layered configuration for the inspector: built-in defaults, the global
//! user file, workspace files, then `STATESCOPE__` environment variables.
//! Declares inspector defaults, extra widget types, and logging.

use crate::context::{Viewport, DEFAULT_ENVIRONMENT};
use crate::error::InspectorError;
use crate::logging::LoggingConfig;
use crate::widget::{WidgetTypeRegistry, WidgetTypeSpec};
use config::{File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge;
mod sources;

pub use merge::merge_policy::builder_with_defaults;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatescopeConfig {
    /// Inspector defaults
    #[serde(default)]
    pub inspector: InspectorSettings,

    /// Widget types added to, or replacing, the built-in catalogue
    ///
    /// Read from the TOML files directly by `ConfigLoader`, keeping key case.
    #[serde(default, skip_deserializing)]
    pub widget_types: HashMap<String, WidgetTypeSpec>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for facts the editor does not supply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectorSettings {
    /// `app.environment` when the editor reports none
    #[serde(default = "default_environment")]
    pub default_environment: String,

    /// Viewport used when the editor reports none
    #[serde(default)]
    pub default_viewport_width: u32,

    #[serde(default)]
    pub default_viewport_height: u32,
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

impl Default for InspectorSettings {
    fn default() -> Self {
        Self {
            default_environment: default_environment(),
            default_viewport_width: 0,
            default_viewport_height: 0,
        }
    }
}

impl InspectorSettings {
    pub fn default_viewport(&self) -> Viewport {
        Viewport {
            width: self.default_viewport_width,
            height: self.default_viewport_height,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.default_environment.trim().is_empty() {
            return Err("Default environment cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Inspector(String),
    WidgetType(String, String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Inspector(msg) => write!(f, "Inspector: {}", msg),
            ValidationError::WidgetType(name, msg) => {
                write!(f, "Widget type '{}': {}", name, msg)
            }
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl StatescopeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.inspector.validate() {
            errors.push(ValidationError::Inspector(e));
        }

        let mut names: Vec<&String> = self.widget_types.keys().collect();
        names.sort();
        for name in names {
            if name.trim().is_empty() {
                errors.push(ValidationError::WidgetType(
                    name.clone(),
                    "Type name cannot be empty".to_string(),
                ));
            }
            if let Err(e) = self.widget_types[name].validate() {
                errors.push(ValidationError::WidgetType(name.clone(), e));
            }
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Built-in widget catalogue extended with the configured types
    pub fn widget_registry(&self) -> WidgetTypeRegistry {
        let mut registry = WidgetTypeRegistry::builtin();
        registry.extend(
            self.widget_types
                .iter()
                .map(|(name, spec)| (name.clone(), spec.clone())),
        );
        registry
    }
}

/// Loads `StatescopeConfig` from the configured sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace
    ///
    /// Precedence (highest last): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{STATESCOPE_ENV}.toml`,
    /// `STATESCOPE__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<StatescopeConfig, InspectorError> {
        let builder = builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = sources::environment::add_to_builder(builder)?;

        let mut config: StatescopeConfig = builder.build()?.try_deserialize()?;

        let mut files: Vec<PathBuf> = global_config_path()
            .filter(|path| path.exists())
            .into_iter()
            .collect();
        files.extend(sources::workspace_file::config_paths(workspace_root));
        config.widget_types = sources::widget_types::load(&files)?;

        Self::checked(config)
    }

    /// Load configuration from one TOML file over the defaults
    pub fn load_from_file(path: &Path) -> Result<StatescopeConfig, InspectorError> {
        if !path.exists() {
            return Err(InspectorError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let mut config: StatescopeConfig = builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.widget_types = sources::widget_types::load(&[path.to_path_buf()])?;
        Self::checked(config)
    }

    /// Configuration with every default applied
    pub fn default() -> StatescopeConfig {
        StatescopeConfig::default()
    }

    fn checked(config: StatescopeConfig) -> Result<StatescopeConfig, InspectorError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            InspectorError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        debug!(
            widget_types = config.widget_types.len(),
            environment = %config.inspector.default_environment,
            "Configuration loaded"
        );
        Ok(config)
    }
}
