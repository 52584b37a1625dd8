//! Integration tests for the Statescope live state inspector

mod cli_commands;
mod config_loading;
mod inspector_pipeline;
mod selection_scenarios;
mod test_utils;

pub use test_utils::{with_xdg_env, write_fixture, APP_JSON, EDITOR_JSON};
