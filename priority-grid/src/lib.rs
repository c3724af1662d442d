//! Priority-ordered data grid core
//!
//! Projects host records into display rows, keeps the sort/filter view of
//! those rows consistent, and turns drag-reorder gestures into dense
//! `sort_order` renumbering requests for the host's data store.

pub mod config;
pub mod control;
pub mod error;
pub mod model;
pub mod persist;
pub mod projection;
pub mod source;
pub mod view;

pub use config::GridConfig;
pub use control::*;
pub use projection::RecordOrdering;
pub use view::ViewState;
