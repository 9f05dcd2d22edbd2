//! The record accessor boundary consumed by the diff engine.

use serde::{Deserialize, Serialize};

use crate::diff::DiffError;
use crate::registry::Registry;
use crate::value::{Map, Value};

/// AssociationKind distinguishes relations the differ may descend into from
/// links pointing back toward a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssociationKind {
    /// The record owns the children's lifecycle; descended into.
    Owned,
    /// An upward link; never descended into, so the owned graph stays
    /// acyclic by construction.
    BelongsTo,
}

/// An association declared on a record's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub name: String,
    pub target_type: String,
    pub kind: AssociationKind,
}

impl Association {
    /// Declares an owned association.
    pub fn owned(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Association {
            name: name.into(),
            target_type: target_type.into(),
            kind: AssociationKind::Owned,
        }
    }

    /// Declares an upward link.
    pub fn belongs_to(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Association {
            name: name.into(),
            target_type: target_type.into(),
            kind: AssociationKind::BelongsTo,
        }
    }
}

/// Record is the accessor boundary the diff engine consumes. Hosts implement
/// it once per concrete record type; the engine never constructs, stores, or
/// mutates records itself.
///
/// Attribute and collection reads must stay stable for the duration of one
/// diff traversal.
pub trait Record {
    /// Registered name of this record's type.
    fn type_name(&self) -> &str;

    /// All persisted scalar fields, including `id`.
    fn attributes(&self) -> Map;

    /// Associations declared on this record's type.
    fn associations(&self) -> Vec<Association>;

    /// Live children for a named association. Implementations return an
    /// empty collection for association names they do not expose, since the
    /// two sides of a diff need not declare the same associations.
    fn collection(&self, name: &str) -> Vec<&dyn Record>;
}

/// Reads a named field from a record, failing when the record does not
/// carry it.
pub fn field_value(record: &dyn Record, field: &str) -> Result<Value, DiffError> {
    record
        .attributes()
        .get(field)
        .cloned()
        .ok_or_else(|| DiffError::MissingField {
            type_name: record.type_name().to_string(),
            field: field.to_string(),
        })
}

/// Names of the associations the differ may descend into: owned relations
/// whose target type is registered.
pub fn eligible_associations(record: &dyn Record, registry: &Registry) -> Vec<String> {
    record
        .associations()
        .into_iter()
        .filter(|a| a.kind == AssociationKind::Owned && registry.is_registered(&a.target_type))
        .map(|a| a.name)
        .collect()
}
