//! Grid configuration

use serde::Deserialize;

/// Configuration for a priority grid.
///
/// # Example
///
/// ```
/// use priority_grid::GridConfig;
///
/// let config = GridConfig::default()
///     .with_priority_field("new_rank")
///     .with_locale("de-DE");
///
/// assert_eq!(config.priority_field, "new_rank");
/// assert_eq!(config.min_search_len, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Integer field holding each record's priority.
    ///
    /// Default: `sort_order`
    pub priority_field: String,

    /// Minimum search text length (in characters) before filtering kicks in.
    ///
    /// Default: 3
    pub min_search_len: usize,

    /// BCP 47 locale used to collate display strings when sorting.
    ///
    /// Default: `en-US`
    pub locale: String,

    /// Whether drag-reorder is accepted while a search filter is active.
    ///
    /// Default: false
    pub reorder_while_filtered: bool,

    /// Maximum number of priority writes in flight at once.
    ///
    /// Default: 52 (the Web API's concurrent request limit per user)
    pub max_concurrent_writes: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            priority_field: "sort_order".to_string(),
            min_search_len: 3,
            locale: "en-US".to_string(),
            reorder_while_filtered: false,
            max_concurrent_writes: 52,
        }
    }
}

impl GridConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the priority field.
    pub fn with_priority_field(mut self, field: impl Into<String>) -> Self {
        self.priority_field = field.into();
        self
    }

    /// Sets the minimum search length.
    pub fn with_min_search_len(mut self, len: usize) -> Self {
        self.min_search_len = len;
        self
    }

    /// Sets the collation locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Allows or forbids reordering while a search filter is active.
    pub fn with_reorder_while_filtered(mut self, allow: bool) -> Self {
        self.reorder_while_filtered = allow;
        self
    }

    /// Sets the write concurrency limit. Zero is treated as one.
    pub fn with_max_concurrent_writes(mut self, limit: usize) -> Self {
        self.max_concurrent_writes = limit.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_config() {
        let config: GridConfig =
            serde_json::from_str(r#"{"priority_field": "rank", "reorder_while_filtered": true}"#)
                .unwrap();

        assert_eq!(config.priority_field, "rank");
        assert!(config.reorder_while_filtered);
        assert_eq!(config.min_search_len, 3);
        assert_eq!(config.max_concurrent_writes, 52);
    }
}
