//! Diff result model.
//!
//! A report is pure data: it is assembled during one diff traversal,
//! returned to the caller, and never retained by the engine.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::value::{Map, Value};

/// Key under which an entry's change classification is rendered.
const CHANGE_TYPE: &str = "change_type";

/// DiffReport is one level of diff output: scalar field deltas plus entry
/// lists for each changed owned collection.
///
/// An empty report means no difference was detected at or below this level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffReport {
    /// Field name to other-side value, for every differing field, plus any
    /// conditional fields riding along on a non-empty result.
    pub fields: Map,

    /// Association name to matched entries, for collections with changes.
    pub collections: BTreeMap<String, Vec<CollectionEntry>>,
}

impl DiffReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        DiffReport::default()
    }

    /// Returns true when no difference was detected at or below this level.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.collections.is_empty()
    }

    fn rendered(&self) -> Map {
        let mut out = self.fields.clone();
        for (name, entries) in &self.collections {
            out.set(
                name.clone(),
                Value::List(entries.iter().map(CollectionEntry::to_value).collect()),
            );
        }
        out
    }

    /// Renders the report as a single nested mapping, suitable for direct
    /// serialization by the host.
    pub fn to_value(&self) -> Value {
        Value::Map(self.rendered())
    }
}

impl Serialize for DiffReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// CollectionEntry classifies one child record within a diffed collection.
///
/// The classification is asymmetric on purpose: a deleted child will never
/// be seen again, so its full state is captured now, while a new child is
/// still live and needs nothing beyond its identity.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionEntry {
    /// Present now, absent from the other snapshot; noted by identity only.
    New { identity_field: String, identity: Value },

    /// Present on both sides with differences. The report carries the delta;
    /// the identity field is reattached on rendering so the entry is
    /// self-identifying.
    Modified {
        identity_field: String,
        identity: Value,
        report: DiffReport,
    },

    /// Absent now, present in the other snapshot; fully preserved.
    Deleted { snapshot: Snapshot },
}

impl CollectionEntry {
    /// The tag rendered into the entry's mapping.
    pub fn change_type(&self) -> &'static str {
        match self {
            CollectionEntry::New { .. } => "new",
            CollectionEntry::Modified { .. } => "modified",
            CollectionEntry::Deleted { .. } => "deleted",
        }
    }

    /// Renders the entry as a mapping carrying its `change_type` tag.
    pub fn to_value(&self) -> Value {
        let mut out = match self {
            CollectionEntry::New {
                identity_field,
                identity,
            } => {
                let mut m = Map::new();
                m.set(identity_field.clone(), identity.clone());
                m
            }
            CollectionEntry::Modified {
                identity_field,
                identity,
                report,
            } => {
                let mut m = report.rendered();
                m.set(identity_field.clone(), identity.clone());
                m
            }
            CollectionEntry::Deleted { snapshot } => snapshot.rendered(),
        };
        out.set(CHANGE_TYPE.into(), Value::String(self.change_type().into()));
        Value::Map(out)
    }
}

impl Serialize for CollectionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Snapshot is the full, null-omitting capture of a deleted record and,
/// recursively, of every child it owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Preserved non-null, non-excluded attributes.
    pub fields: Map,

    /// Preserved children per association; everything reachable from a
    /// deleted record is itself deleted.
    pub children: BTreeMap<String, Vec<Snapshot>>,
}

impl Snapshot {
    /// Returns true when nothing was preserved.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.children.is_empty()
    }

    fn rendered(&self) -> Map {
        let mut out = self.fields.clone();
        for (name, subs) in &self.children {
            out.set(
                name.clone(),
                Value::List(subs.iter().map(Snapshot::to_value).collect()),
            );
        }
        out
    }

    /// Renders the snapshot as a mapping tagged deleted, with the tag
    /// repeated at every nested level.
    pub fn to_value(&self) -> Value {
        let mut out = self.rendered();
        out.set(CHANGE_TYPE.into(), Value::String("deleted".into()));
        Value::Map(out)
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
