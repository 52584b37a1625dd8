//! Merge rules: built-in defaults applied beneath every other source.

use crate::context::DEFAULT_ENVIRONMENT;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("inspector.default_environment", DEFAULT_ENVIRONMENT)?
        .set_default("inspector.default_viewport_width", 0_i64)?
        .set_default("inspector.default_viewport_height", 0_i64)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
