//! The grid's view state
//!
//! `ViewState` is a plain value. Every transition consumes the current state
//! and returns the next one, re-deriving the visible rows before it returns,
//! so the visible rows can never drift from `rows`, the sort and the search.

use std::sync::Arc;

use log::debug;

use super::DisplayCollator;
use super::SearchFilter;
use crate::config::GridConfig;
use crate::model::Row;

/// Sort marker shown on a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortIndicator {
    /// The column is not the sort column.
    #[default]
    None,
    /// Sorted ascending by this column.
    Ascending,
    /// Sorted descending by this column.
    Descending,
}

/// Rows in priority order plus the user's sort and search preferences.
///
/// # Example
///
/// ```
/// use priority_grid::GridConfig;
/// use priority_grid::ViewState;
/// use priority_grid::model::{RecordReference, Row};
///
/// let rows = ["B", "A", "C"]
///     .iter()
///     .map(|name| Row::new(RecordReference::new("tasks", *name)).with_field("name", *name))
///     .collect();
///
/// let state = ViewState::new(GridConfig::default())
///     .set_records(rows)
///     .sort_by("name");
///
/// let names: Vec<&str> = state.visible_rows().iter().map(|r| r.field("name")).collect();
/// assert_eq!(names, vec!["A", "B", "C"]);
/// ```
#[derive(Debug, Clone)]
pub struct ViewState {
    pub(super) rows: Vec<Row>,
    pub(super) sort_column: Option<String>,
    pub(super) sort_descending: bool,
    pub(super) search_text: String,
    /// Positions in `rows`, in display order.
    pub(super) visible: Vec<usize>,
    pub(super) config: GridConfig,
    pub(super) collator: Arc<DisplayCollator>,
}

impl ViewState {
    /// Creates an empty view.
    pub fn new(config: GridConfig) -> Self {
        let collator = Arc::new(DisplayCollator::new(&config.locale));
        Self {
            rows: Vec::new(),
            sort_column: None,
            sort_descending: false,
            search_text: String::new(),
            visible: Vec::new(),
            config,
            collator,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Rows in current priority order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows as displayed: filtered, then sorted.
    pub fn visible_rows(&self) -> Vec<&Row> {
        self.visible.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Active sort column.
    pub fn sort_column(&self) -> Option<&str> {
        self.sort_column.as_deref()
    }

    /// Whether the active sort is descending.
    pub fn sort_descending(&self) -> bool {
        self.sort_descending
    }

    /// Search text exactly as entered.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// The configuration this view was created with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Returns `true` if the search text currently narrows the rows.
    pub fn is_filtering(&self) -> bool {
        self.search_filter().is_active()
    }

    /// Sort marker for a column header.
    pub fn sort_indicator(&self, column: &str) -> SortIndicator {
        match self.sort_column.as_deref() {
            Some(active) if active == column && self.sort_descending => SortIndicator::Descending,
            Some(active) if active == column => SortIndicator::Ascending,
            _ => SortIndicator::None,
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Replaces the rows wholesale, keeping sort and search preferences.
    pub fn set_records(mut self, rows: Vec<Row>) -> Self {
        debug!("Replacing {} rows with {}", self.rows.len(), rows.len());
        self.rows = rows;
        self.derive()
    }

    /// Sorts by a column, toggling the direction when it is already the sort column.
    ///
    /// The sort lasts until the next [`reorder`](Self::reorder) commits: a
    /// move made while sorted keeps the displayed order as the new priorities
    /// and clears the sort column.
    pub fn sort_by(mut self, column: &str) -> Self {
        if self.sort_column.as_deref() == Some(column) {
            self.sort_descending = !self.sort_descending;
        } else {
            self.sort_column = Some(column.to_string());
            self.sort_descending = false;
        }
        debug!(
            "Sorting by '{}' {}",
            column,
            if self.sort_descending { "descending" } else { "ascending" }
        );
        self.derive()
    }

    /// Stores the search text verbatim and re-filters.
    pub fn set_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self.derive()
    }

    // =========================================================================
    // Derivation
    // =========================================================================

    fn search_filter(&self) -> SearchFilter {
        SearchFilter::new(&self.search_text, self.config.min_search_len)
    }

    /// Positions of `candidates` ordered by the active sort, stable on ties.
    pub(super) fn sort_positions(&self, mut candidates: Vec<usize>) -> Vec<usize> {
        if let Some(column) = &self.sort_column {
            candidates.sort_by(|&a, &b| {
                let ordering = self
                    .collator
                    .compare(self.rows[a].field(column), self.rows[b].field(column));
                if self.sort_descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        candidates
    }

    pub(super) fn derive(mut self) -> Self {
        let filter = self.search_filter();
        let matching = (0..self.rows.len())
            .filter(|&i| filter.matches(&self.rows[i]))
            .collect();
        self.visible = self.sort_positions(matching);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordReference;

    fn named_rows(names: &[&str]) -> Vec<Row> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Row::new(RecordReference::new("tasks", format!("id-{i}"))).with_field("name", *name)
            })
            .collect()
    }

    fn visible_names(state: &ViewState) -> Vec<&str> {
        state.visible_rows().iter().map(|r| r.field("name")).collect()
    }

    #[test]
    fn test_unsorted_preserves_row_order() {
        let state = ViewState::new(GridConfig::default()).set_records(named_rows(&["B", "A", "C"]));

        assert_eq!(visible_names(&state), vec!["B", "A", "C"]);
        assert_eq!(state.sort_indicator("name"), SortIndicator::None);
    }

    #[test]
    fn test_sort_toggles_direction() {
        let state = ViewState::new(GridConfig::default())
            .set_records(named_rows(&["B", "A", "C"]))
            .sort_by("name");
        assert_eq!(visible_names(&state), vec!["A", "B", "C"]);
        assert_eq!(state.sort_indicator("name"), SortIndicator::Ascending);

        let state = state.sort_by("name");
        assert_eq!(visible_names(&state), vec!["C", "B", "A"]);
        assert_eq!(state.sort_indicator("name"), SortIndicator::Descending);

        // Sorting never touches priority order
        let rows: Vec<&str> = state.rows().iter().map(|r| r.field("name")).collect();
        assert_eq!(rows, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_sort_new_column_resets_direction() {
        let state = ViewState::new(GridConfig::default())
            .set_records(named_rows(&["b", "a"]))
            .sort_by("name")
            .sort_by("name")
            .sort_by("city");

        assert_eq!(state.sort_column(), Some("city"));
        assert!(!state.sort_descending());
    }

    #[test]
    fn test_sort_is_case_insensitive_and_missing_is_empty() {
        let mut rows = named_rows(&["banana", "Apple", "cherry"]);
        rows.push(Row::new(RecordReference::new("tasks", "blank")));

        let state = ViewState::new(GridConfig::default())
            .set_records(rows)
            .sort_by("name");

        assert_eq!(visible_names(&state), vec!["", "Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_short_query_passes_everything_through() {
        let state = ViewState::new(GridConfig::default())
            .set_records(named_rows(&["xabcx", "ABC", "zzz", "ab"]))
            .set_search_text("ab");

        assert_eq!(state.search_text(), "ab");
        assert!(!state.is_filtering());
        assert_eq!(state.visible_rows().len(), 4);

        let state = state.set_search_text("abc");
        assert!(state.is_filtering());
        assert_eq!(visible_names(&state), vec!["xabcx", "ABC"]);
    }

    #[test]
    fn test_refresh_keeps_sort_and_search() {
        let state = ViewState::new(GridConfig::default())
            .set_records(named_rows(&["old one", "old two"]))
            .sort_by("name")
            .sort_by("name")
            .set_search_text("new");

        let state = state.set_records(named_rows(&["new b", "stale", "new c", "new a"]));

        assert_eq!(state.sort_column(), Some("name"));
        assert!(state.sort_descending());
        assert_eq!(state.search_text(), "new");
        assert_eq!(visible_names(&state), vec!["new c", "new b", "new a"]);
    }

    #[test]
    fn test_min_search_len_is_configurable() {
        let state = ViewState::new(GridConfig::default().with_min_search_len(1))
            .set_records(named_rows(&["a", "b"]))
            .set_search_text("a");

        assert_eq!(visible_names(&state), vec!["a"]);
    }
}
