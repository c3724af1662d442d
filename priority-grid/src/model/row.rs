//! Derived display rows

use std::collections::HashMap;

use super::RecordReference;

/// A flat, display-ready projection of one host record.
///
/// Rows are owned by the grid and rebuilt from scratch whenever the host
/// reports a new dataset version. Their order within a view is the current
/// priority order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The host record id.
    pub id: String,
    /// Write-back handle for the record this row was built from.
    pub reference: RecordReference,
    /// Display strings keyed by column key.
    pub fields: HashMap<String, String>,
}

impl Row {
    /// Creates a row with no fields.
    pub fn new(reference: RecordReference) -> Self {
        Self {
            id: reference.id.clone(),
            reference,
            fields: HashMap::new(),
        }
    }

    /// Sets a field display string (builder pattern).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns the display string for a column, or `""` when absent.
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}
