//! Workspace config file source: config/config.toml and config/{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::{Path, PathBuf};

pub const ENV_PROFILE: &str = "STATESCOPE_ENV";

/// Existing workspace config files, lowest precedence first:
/// config/config.toml (base) then config/{STATESCOPE_ENV}.toml.
pub fn config_paths(workspace_root: &Path) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    let env_name = std::env::var(ENV_PROFILE).unwrap_or_else(|_| "development".to_string());

    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name)),
    ]
    .into_iter()
    .filter(|path| path.exists())
    .collect()
}

/// Add workspace config files to builder.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for path in config_paths(workspace_root) {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
    }
    Ok(builder)
}
