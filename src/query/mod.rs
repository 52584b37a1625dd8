//! Query domain: descriptors, run results, settings normalization, and the
//! query state synthesizer.

pub mod descriptor;
pub mod plugin;
pub mod settings;
pub mod state;

pub use descriptor::{QueryDescriptor, QueryRunResult, RunStatus};
pub use plugin::PluginType;
pub use settings::{AdvancedSettings, QuerySettings, ResponseSettings};
pub use state::{synthesize_query_state, QueryState, RunSnapshot};
