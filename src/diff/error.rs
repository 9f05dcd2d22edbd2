//! Diff failure modes.

use thiserror::Error;

/// DiffError represents a condition that aborts a diff with no result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// The two root records' types fail the compatibility rule.
    #[error("unable to compare {current} to {other}")]
    IncompatibleTypes { current: String, other: String },

    /// A collection element's type declares no identity field.
    #[error("type {type_name} has no identity field configured for matching within {association}")]
    MissingIdentityConfiguration {
        type_name: String,
        association: String,
    },

    /// A field was read from a record that does not carry it.
    #[error("record of type {type_name} has no field {field}")]
    MissingField { type_name: String, field: String },
}
