//! Free-text row filtering

use crate::model::Row;

/// A case-insensitive substring filter over every field of a row.
///
/// The filter only narrows once the query is longer than the configured
/// minimum; shorter queries match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    needle: Option<String>,
}

impl SearchFilter {
    /// Creates a filter for `text`, active once it has at least `min_len` characters.
    pub fn new(text: &str, min_len: usize) -> Self {
        let needle = (text.chars().count() >= min_len && !text.is_empty()).then(|| text.to_lowercase());
        Self { needle }
    }

    /// Returns `true` if the filter narrows the rows.
    pub fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    /// Returns `true` if `row` passes the filter.
    pub fn matches(&self, row: &Row) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => row
                .fields
                .values()
                .any(|value| value.to_lowercase().contains(needle.as_str())),
        }
    }
}
