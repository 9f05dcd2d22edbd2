//! Per-type diff configuration: excluded fields, identity fields,
//! conditional fields, and base-type relationships.
//!
//! Configurations are registered once at startup and never mutated; the
//! registry is safe to share across concurrent diffs.

mod elements;

pub use elements::{Registry, RegistryBuilder, TypeConfig};
