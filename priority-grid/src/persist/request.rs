//! Priority update requests

use serde::Serialize;

use crate::model::Record;
use crate::model::RecordReference;

/// One priority write produced by a reorder.
///
/// Requests are transient: built when a reorder commits, handed to the
/// dispatcher and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistenceRequest {
    /// The record to update.
    pub reference: RecordReference,
    /// The priority field name.
    pub field: String,
    /// The new priority.
    pub value: i64,
}

impl PersistenceRequest {
    /// Creates a new request.
    pub fn new(reference: RecordReference, field: impl Into<String>, value: i64) -> Self {
        Self {
            reference,
            field: field.into(),
            value,
        }
    }

    /// Builds the partial update record sent to the host.
    pub fn to_record(&self) -> Record {
        Record::new().set(&self.field, self.value)
    }
}
