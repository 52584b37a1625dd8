//! Statescope: Live State Inspection for Low-Code App Builders
//!
//! Builds the evaluation context of an app under construction, resolves every
//! widget property, query, transformer and page into a stable snapshot, tracks
//! the target the author is inspecting, and filters resolved trees by free text.

pub mod cli;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod expression;
pub mod inspector;
pub mod logging;
pub mod query;
pub mod search;
pub mod targets;
pub mod types;
pub mod widget;
