//! Identity-keyed matching of owned collections.

use super::differ::Differ;
use super::error::DiffError;
use super::report::CollectionEntry;
use crate::record::{field_value, Record};
use crate::value::Value;

impl<'a> Differ<'a> {
    /// Partitions two snapshots of a named collection into new, modified,
    /// and deleted entries.
    ///
    /// New and modified entries come first, in current-side order, followed
    /// by deleted entries in other-side order. Identity values are assumed
    /// unique within a collection; on duplicates the first match wins.
    pub(crate) fn match_collection(
        &self,
        association: &str,
        current: &[&dyn Record],
        other: &[&dyn Record],
    ) -> Result<Vec<CollectionEntry>, DiffError> {
        let current_ids = self.collection_identities(association, current)?;
        let other_ids = self.collection_identities(association, other)?;

        let mut entries = Vec::new();

        for (record, id) in current.iter().zip(current_ids.iter()) {
            let matched = other
                .iter()
                .zip(other_ids.iter())
                .find(|(_, other_id)| *other_id == id)
                .map(|(matched, _)| *matched);

            match matched {
                Some(other_record) => {
                    // Pre-existing child: report only if something changed.
                    let report = self.diff_records(*record, other_record)?;
                    if !report.is_empty() {
                        let identity_field =
                            self.identity_field(*record, association)?.to_string();
                        entries.push(CollectionEntry::Modified {
                            identity_field,
                            identity: id.clone(),
                            report,
                        });
                    }
                }
                None => {
                    // Still live elsewhere; its arrival is noted by identity.
                    let identity_field = self.identity_field(*record, association)?.to_string();
                    entries.push(CollectionEntry::New {
                        identity_field,
                        identity: id.clone(),
                    });
                }
            }
        }

        // Children only the other snapshot knows about will never be seen
        // again; capture them in full.
        for (record, id) in other.iter().zip(other_ids.iter()) {
            if !current_ids.contains(id) {
                entries.push(CollectionEntry::Deleted {
                    snapshot: self.preserve(*record)?,
                });
            }
        }

        Ok(entries)
    }

    fn collection_identities(
        &self,
        association: &str,
        records: &[&dyn Record],
    ) -> Result<Vec<Value>, DiffError> {
        records
            .iter()
            .map(|record| {
                let field = self.identity_field(*record, association)?;
                field_value(*record, field)
            })
            .collect()
    }

    fn identity_field(
        &self,
        record: &dyn Record,
        association: &str,
    ) -> Result<&str, DiffError> {
        self.registry()
            .config_for(record.type_name())
            .identity_field
            .as_deref()
            .ok_or_else(|| DiffError::MissingIdentityConfiguration {
                type_name: record.type_name().to_string(),
                association: association.to_string(),
            })
    }
}
