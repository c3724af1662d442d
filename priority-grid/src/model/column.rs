//! Column descriptors supplied by the host

use serde::Deserialize;
use serde::Serialize;

/// A column of the grid.
///
/// `key` is the field name rows are keyed by and must be unique within a
/// column set; `display_name` is the header text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub display_name: String,
}

impl Column {
    /// Creates a new column descriptor.
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
        }
    }
}
