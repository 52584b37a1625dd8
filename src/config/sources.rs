pub mod environment;
pub mod global_file;
pub mod widget_types;
pub mod workspace_file;
