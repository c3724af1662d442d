//! Record references used for write-back

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A stable handle to a host record, used only when writing back.
///
/// `entity_collection` is the entity set the host's write API addresses
/// (e.g. "accounts"); `id` is the host's opaque record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordReference {
    /// The entity set name (e.g., "accounts").
    pub entity_collection: String,
    /// The record identifier.
    pub id: String,
}

impl RecordReference {
    /// Creates a new record reference.
    pub fn new(entity_collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity_collection: entity_collection.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for RecordReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.entity_collection, self.id)
    }
}
