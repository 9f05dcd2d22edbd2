//! # Record Diff
//!
//! Structured, retrospective diffs between two snapshots of the same logical
//! record and its owned child collections.
//!
//! Given a "current" version and a replacement "other" version, [`diff`]
//! produces a minimal description of what must change on the current
//! version's fields to reach the other version, recursing through owned
//! associations. Children matched by identity are expressed as deltas,
//! children unique to the current side are noted by identity only, and
//! children unique to the other side are fully preserved — once the other
//! snapshot is gone, their state is unrecoverable.
//!
//! Records reach the engine through the [`record::Record`] accessor trait;
//! per-type behavior (excluded fields, identity fields, conditional fields,
//! base types) is declared up front in a [`registry::Registry`]. The engine
//! itself performs no I/O and keeps no state between calls.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of field values and rendered output
//! - [`registry`] - Per-type diff configuration
//! - [`record`] - The accessor boundary hosts implement, plus a serde-loaded
//!   record tree for document-based hosts
//! - [`diff`] - The diff engine

pub mod diff;
pub mod record;
pub mod registry;
pub mod value;

pub use diff::{diff, CollectionEntry, DiffError, DiffReport, Differ, Snapshot};
pub use record::{Association, AssociationKind, DynamicRecord, Record};
pub use registry::{Registry, RegistryBuilder, TypeConfig};
pub use value::{Map, Value};
