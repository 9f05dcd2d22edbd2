//! Full preservation of deleted records.

use std::collections::BTreeMap;

use super::attributes::filtered_attributes;
use super::differ::Differ;
use super::error::DiffError;
use super::report::Snapshot;
use crate::record::{eligible_associations, field_value, Record};
use crate::value::Map;

impl<'a> Differ<'a> {
    /// Captures everything reachable from a record about to disappear:
    /// its non-null, non-excluded attributes plus every child of every
    /// eligible association, recursively. There is no other side at this
    /// depth — whatever a deleted record owns is deleted with it.
    pub(crate) fn preserve(&self, record: &dyn Record) -> Result<Snapshot, DiffError> {
        let config = self.registry().config_for(record.type_name());

        let mut fields = Map::new();
        for (field, value) in filtered_attributes(record, config).iter() {
            if !value.is_null() {
                fields.set(field.clone(), value.clone());
            }
        }

        let mut children = BTreeMap::new();
        for name in eligible_associations(record, self.registry()) {
            let subs = record
                .collection(&name)
                .into_iter()
                .map(|child| self.preserve(child))
                .collect::<Result<Vec<_>, _>>()?;
            if !subs.is_empty() {
                children.insert(name, subs);
            }
        }

        let mut snapshot = Snapshot { fields, children };
        if !snapshot.is_empty() {
            for field in &config.conditional_fields {
                snapshot.fields.set(field.clone(), field_value(record, field)?);
            }
        }
        Ok(snapshot)
    }
}
