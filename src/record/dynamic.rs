//! Self-contained record trees for hosts without a live object model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::accessor::{Association, AssociationKind, Record};
use crate::value::Map;

/// DynamicRecord is a record tree loaded from a JSON or YAML document. The
/// CLI diffs exported snapshots through it; hosts with live objects
/// implement [`Record`] directly instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicRecord {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub collections: BTreeMap<String, DynamicCollection>,
}

/// One owned collection inside a [`DynamicRecord`] document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicCollection {
    /// Element type; defaults to the type of the first record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<DynamicRecord>,
}

impl DynamicCollection {
    fn target_type(&self) -> &str {
        match &self.target {
            Some(target) => target,
            None => self
                .records
                .first()
                .map(|r| r.type_name.as_str())
                .unwrap_or(""),
        }
    }
}

impl DynamicRecord {
    /// Parses a record tree from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a record tree from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

impl Record for DynamicRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn attributes(&self) -> Map {
        self.attributes.clone()
    }

    fn associations(&self) -> Vec<Association> {
        // Nested documents only carry children the record owns; upward
        // links are not materialized in this representation.
        self.collections
            .iter()
            .map(|(name, collection)| Association {
                name: name.clone(),
                target_type: collection.target_type().to_string(),
                kind: AssociationKind::Owned,
            })
            .collect()
    }

    fn collection(&self, name: &str) -> Vec<&dyn Record> {
        match self.collections.get(name) {
            Some(collection) => collection
                .records
                .iter()
                .map(|r| r as &dyn Record)
                .collect(),
            None => Vec::new(),
        }
    }
}
