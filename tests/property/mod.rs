//! Property-based tests for resolution and filter laws

mod laws;
