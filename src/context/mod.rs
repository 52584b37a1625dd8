//! Context domain: environment facts, evaluation context, and the context builder.
//! Owns context assembly; widget resolution, queries and the inspector consume via `Context`.

pub mod builder;
pub mod environment;
pub mod types;

pub use builder::{
    build_context, ContextFingerprint, ContextInputs, QueryBinding, WidgetBinding,
    DEFAULT_ENVIRONMENT,
};
pub use environment::{parse_location, EnvironmentFacts, Location, PageRef, Viewport};
pub use types::Context;
