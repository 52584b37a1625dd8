//! Widget domain: instance trees, field schemas, the widget type registry, and
//! the property resolver.

pub mod instance;
pub mod resolver;
pub mod schema;
pub mod types;

pub use instance::{flatten_trees, HeightMode, SpacingOverride, WidgetInstance};
pub use resolver::{resolve_fields, FieldResolution, PropertyResolver, ResolvedWidget};
pub use schema::FieldSchema;
pub use types::{WidgetTypeRegistry, WidgetTypeSpec};
