//! Diff orchestration and type compatibility.

use std::collections::BTreeMap;

use super::attributes::{diff_attributes, filtered_attributes};
use super::error::DiffError;
use super::report::DiffReport;
use crate::record::{eligible_associations, field_value, Record};
use crate::registry::Registry;

/// Differ drives a full recursive diff against a fixed registry.
///
/// The engine is synchronous and purely functional over its inputs: no
/// state survives a [`Differ::diff`] call, and concurrent calls on disjoint
/// record pairs do not interact.
pub struct Differ<'a> {
    registry: &'a Registry,
}

impl<'a> Differ<'a> {
    /// Creates a differ over the given registry.
    pub fn new(registry: &'a Registry) -> Self {
        Differ { registry }
    }

    pub(crate) fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Computes what must change on `current`'s fields to reach `other`,
    /// recursing through owned associations.
    ///
    /// An empty report means no difference exists at any depth. Any error
    /// aborts the whole call with no partial result.
    pub fn diff(
        &self,
        current: &dyn Record,
        other: &dyn Record,
    ) -> Result<DiffReport, DiffError> {
        self.check_compatibility(current, other)?;
        self.diff_records(current, other)
    }

    /// Recursive entry point. Matched sub-record pairs are same-type by
    /// construction of the collection matcher and skip the compatibility
    /// check.
    pub(crate) fn diff_records(
        &self,
        current: &dyn Record,
        other: &dyn Record,
    ) -> Result<DiffReport, DiffError> {
        let current_config = self.registry.config_for(current.type_name());
        let other_config = self.registry.config_for(other.type_name());

        let current_attribs = filtered_attributes(current, current_config);
        let other_attribs = filtered_attributes(other, other_config);

        let mut report = DiffReport {
            fields: diff_attributes(&current_attribs, &other_attribs),
            collections: BTreeMap::new(),
        };

        for name in self.association_names(current, other) {
            let current_children = current.collection(&name);
            let other_children = other.collection(&name);
            let entries = self.match_collection(&name, &current_children, &other_children)?;
            if !entries.is_empty() {
                report.collections.insert(name, entries);
            }
        }

        // Conditional fields only ride along on top of a real change.
        if !report.is_empty() {
            for field in &other_config.conditional_fields {
                report.fields.set(field.clone(), field_value(other, field)?);
            }
        }

        Ok(report)
    }

    /// Union of both sides' eligible associations, current side first.
    fn association_names(&self, current: &dyn Record, other: &dyn Record) -> Vec<String> {
        let mut names = eligible_associations(current, self.registry);
        for name in eligible_associations(other, self.registry) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Two types are comparable when they are identical, when one is the
    /// other's immediate base, or when both specialize the same base.
    /// Unrelated lineages are rejected.
    fn check_compatibility(
        &self,
        current: &dyn Record,
        other: &dyn Record,
    ) -> Result<(), DiffError> {
        let current_type = current.type_name();
        let other_type = other.type_name();
        let current_base = self.registry.base_of(current_type);
        let other_base = self.registry.base_of(other_type);

        let compatible = if current_base.is_none() || other_base.is_none() {
            current_type == other_type
                || current_base == Some(other_type)
                || other_base == Some(current_type)
        } else {
            current_type == other_type || current_base == other_base
        };

        if compatible {
            Ok(())
        } else {
            Err(DiffError::IncompatibleTypes {
                current: current_type.to_string(),
                other: other_type.to_string(),
            })
        }
    }
}

/// Convenience wrapper around [`Differ::diff`] for one-off comparisons.
pub fn diff(
    registry: &Registry,
    current: &dyn Record,
    other: &dyn Record,
) -> Result<DiffReport, DiffError> {
    Differ::new(registry).diff(current, other)
}
