//! Record access: the trait boundary hosts implement, association metadata,
//! and a serde-loaded record tree for document-based hosts.

mod accessor;
mod dynamic;

pub use accessor::{eligible_associations, field_value, Association, AssociationKind, Record};
pub use dynamic::{DynamicCollection, DynamicRecord};
