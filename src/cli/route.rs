//! CLI route: single route table and run context. Dispatches to the inspector and presentation.

use crate::cli::command_name;
use crate::cli::parse::{Commands, InputArgs};
use crate::cli::presentation::{
    format_context_output, format_search_output, format_state_json, format_state_text,
    format_targets_json, format_targets_text,
};
use crate::config::{ConfigLoader, StatescopeConfig};
use crate::document::{AppDocument, EditorState};
use crate::error::InspectorError;
use crate::inspector::{Inspector, InspectorSnapshot};
use crate::search::filter;
use crate::targets::StateTarget;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Runtime context for CLI execution: the loaded configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: StatescopeConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: &Path, config_path: Option<&Path>) -> Result<Self, InspectorError> {
        let config = match config_path {
            Some(cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(workspace_root)?,
        };
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: StatescopeConfig) -> Self {
        Self { config }
    }

    /// Execute one command, returning the text to print
    pub fn execute(&self, command: &Commands) -> Result<String, InspectorError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, InspectorError> {
        match command {
            Commands::Inspect {
                input,
                target,
                format,
            } => {
                let snapshot = self.snapshot(input)?;
                let selected = select_target(&snapshot, target.as_deref())?;
                let active = snapshot.active_target.as_deref() == Some(selected.id.as_str());
                if format == "json" {
                    format_state_json(selected)
                } else {
                    format_state_text(selected, active)
                }
            }
            Commands::Targets { input, format } => {
                let snapshot = self.snapshot(input)?;
                if format == "json" {
                    format_targets_json(&snapshot)
                } else {
                    Ok(format_targets_text(&snapshot))
                }
            }
            Commands::Search {
                input,
                query,
                target,
            } => {
                let snapshot = self.snapshot(input)?;
                let result = match target {
                    Some(_) => filter(&select_target(&snapshot, target.as_deref())?.state, query),
                    None => snapshot.search(query),
                };
                format_search_output(result, query)
            }
            Commands::Context { input } => {
                let (app, editor) = self.load_inputs(input)?;
                let context = Inspector::from_config(&self.config).context(&app, &editor);
                format_context_output(&context)
            }
        }
    }

    fn load_inputs(&self, input: &InputArgs) -> Result<(AppDocument, EditorState), InspectorError> {
        let app = AppDocument::load(&input.app)?;
        let editor = match &input.editor {
            Some(path) => EditorState::load(path)?,
            None => EditorState::default(),
        };
        Ok((app, editor))
    }

    fn snapshot(&self, input: &InputArgs) -> Result<InspectorSnapshot, InspectorError> {
        let (app, editor) = self.load_inputs(input)?;
        Ok(Inspector::from_config(&self.config).rebuild(&app, &editor))
    }
}

/// Named target, or the active one when no id is given
fn select_target<'a>(
    snapshot: &'a InspectorSnapshot,
    id: Option<&str>,
) -> Result<&'a StateTarget, InspectorError> {
    let id = match id.or(snapshot.active_target.as_deref()) {
        Some(id) => id,
        None => return Err(InspectorError::TargetNotFound("<active>".to_string())),
    };
    snapshot
        .target(id)
        .ok_or_else(|| InspectorError::TargetNotFound(id.to_string()))
}
