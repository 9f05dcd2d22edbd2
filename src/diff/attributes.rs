//! Flat attribute comparison.

use crate::record::Record;
use crate::registry::TypeConfig;
use crate::value::Map;

/// The storage-level surrogate key; never compared, never preserved.
pub(crate) const ID_FIELD: &str = "id";

/// Returns a record's attributes with `id` and the type's excluded fields
/// removed.
pub(crate) fn filtered_attributes(record: &dyn Record, config: &TypeConfig) -> Map {
    let mut attribs = record.attributes();
    attribs.delete(ID_FIELD);
    for field in &config.excluded_fields {
        attribs.delete(field);
    }
    attribs
}

/// Compares two filtered attribute maps.
///
/// The delta is expressed in the other side's terms: every field whose other
/// side value differs from, or is absent on, the current side appears with
/// the other side's value — what must be set on current to reach other.
/// Fields present only on the current side are not reported.
pub fn diff_attributes(current: &Map, other: &Map) -> Map {
    let mut delta = Map::new();
    for (field, value) in other.iter() {
        if current.get(field) != Some(value) {
            delta.set(field.clone(), value.clone());
        }
    }
    delta
}
