//! Host lifecycle adapter
//!
//! [`PriorityControl`] is what a host shell talks to: it forwards lifecycle
//! hooks, header clicks, search input and drag gestures to the
//! [`ViewState`], dispatches the resulting priority writes, and hands back
//! what to render.

use std::sync::Arc;

use log::debug;
use log::info;

use crate::config::GridConfig;
use crate::model::Column;
use crate::model::Row;
use crate::persist::Dispatched;
use crate::persist::RecordWriter;
use crate::persist::WriteDispatcher;
use crate::projection;
use crate::source::Dataset;
use crate::source::SourceRecord;
use crate::view::SortIndicator;
use crate::view::ViewState;

/// Receives the end of a drag gesture.
///
/// Any UI toolkit can drive reordering by reporting where a drag started
/// and where it was dropped (`None` when dropped outside the list).
pub trait DragHandler {
    fn on_drag_end(&mut self, from_index: usize, to_index: Option<usize>) -> Dispatched;
}

/// A column header as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub key: String,
    pub display_name: String,
    pub sort: SortIndicator,
}

/// Everything the shell needs to draw the grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutput {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<Row>,
    /// Whether drag-reorder is currently accepted.
    pub reorder_enabled: bool,
}

/// Identity of a loaded dataset: its version plus its record id sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DatasetKey {
    version: u64,
    ids: String,
}

impl DatasetKey {
    fn of<D: Dataset>(dataset: &D) -> Self {
        let ids = match dataset.sorted_record_ids() {
            Some(ids) => ids.join(","),
            None => dataset
                .records()
                .iter()
                .filter_map(|record| record.reference().ok())
                .map(|reference| reference.id)
                .collect::<Vec<_>>()
                .join(","),
        };
        Self {
            version: dataset.version(),
            ids,
        }
    }
}

/// The embeddable priority grid.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use priority_grid::{GridConfig, PriorityControl};
/// use priority_grid::model::Column;
/// use priority_grid::persist::InMemoryStore;
///
/// let store = Arc::new(InMemoryStore::new("tasks", vec![Column::new("name", "Name")]));
/// let mut control = PriorityControl::new(GridConfig::default(), store.clone());
///
/// let output = control.on_init(&store.snapshot());
/// assert_eq!(output.columns[0].display_name, "Name");
/// assert!(output.rows.is_empty());
/// ```
#[derive(Debug)]
pub struct PriorityControl {
    config: GridConfig,
    dispatcher: WriteDispatcher,
    columns: Vec<Column>,
    state: Option<ViewState>,
    loaded: Option<DatasetKey>,
}

impl PriorityControl {
    /// Creates a control writing priorities through `writer`.
    pub fn new(config: GridConfig, writer: Arc<dyn RecordWriter>) -> Self {
        let dispatcher = WriteDispatcher::new(writer, config.max_concurrent_writes);
        Self {
            config,
            dispatcher,
            columns: Vec::new(),
            state: None,
            loaded: None,
        }
    }

    /// Returns `true` between `on_init` and `on_destroy`.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Returns the current view state, if initialized.
    pub fn state(&self) -> Option<&ViewState> {
        self.state.as_ref()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Initializes the grid from the host's dataset.
    pub fn on_init<D: Dataset>(&mut self, dataset: &D) -> RenderOutput {
        info!("Initializing priority grid");
        self.state = Some(ViewState::new(self.config.clone()));
        self.load(dataset);
        self.render()
    }

    /// Rebuilds the rows when the dataset's version or record set changed.
    ///
    /// Sort and search preferences survive the rebuild.
    pub fn on_dataset_updated<D: Dataset>(&mut self, dataset: &D) -> RenderOutput {
        if self.state.is_none() {
            debug!("Ignoring dataset update before init");
            return RenderOutput::default();
        }
        if self.loaded.as_ref() == Some(&DatasetKey::of(dataset)) {
            debug!("Dataset version {} already loaded", dataset.version());
        } else {
            self.load(dataset);
        }
        self.render()
    }

    /// Tears the grid down; later events are ignored until the next init.
    pub fn on_destroy(&mut self) {
        info!("Destroying priority grid");
        self.state = None;
        self.columns.clear();
        self.loaded = None;
    }

    fn load<D: Dataset>(&mut self, dataset: &D) {
        let rows = projection::build_dataset(dataset, &self.config);
        debug!(
            "Loaded {} rows at dataset version {}",
            rows.len(),
            dataset.version()
        );
        self.columns = dataset.columns().to_vec();
        self.loaded = Some(DatasetKey::of(dataset));
        self.state = self.state.take().map(|state| state.set_records(rows));
    }

    // =========================================================================
    // User events
    // =========================================================================

    /// Handles a click on a column header.
    pub fn on_column_click(&mut self, key: &str) -> RenderOutput {
        if !self.columns.iter().any(|column| column.key == key) {
            debug!("Ignoring click on unknown column '{}'", key);
            return self.render();
        }
        self.state = self.state.take().map(|state| state.sort_by(key));
        self.render()
    }

    /// Handles a change of the search box.
    pub fn on_search(&mut self, text: &str) -> RenderOutput {
        self.state = self.state.take().map(|state| state.set_search_text(text));
        self.render()
    }

    /// Produces the current render output.
    pub fn render(&self) -> RenderOutput {
        let Some(state) = &self.state else {
            return RenderOutput::default();
        };

        RenderOutput {
            columns: self
                .columns
                .iter()
                .map(|column| ColumnHeader {
                    key: column.key.clone(),
                    display_name: column.display_name.clone(),
                    sort: state.sort_indicator(&column.key),
                })
                .collect(),
            rows: state.visible_rows().into_iter().cloned().collect(),
            reorder_enabled: !state.is_filtering() || self.config.reorder_while_filtered,
        }
    }
}

impl DragHandler for PriorityControl {
    fn on_drag_end(&mut self, from_index: usize, to_index: Option<usize>) -> Dispatched {
        let Some(state) = self.state.take() else {
            debug!("Ignoring drag before init");
            return Dispatched::default();
        };

        let (state, requests) = state.reorder(from_index, to_index);
        self.state = Some(state);
        self.dispatcher.dispatch(requests)
    }
}
