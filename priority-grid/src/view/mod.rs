//! Sort, filter and reorder state of the grid

mod collate;
mod filter;
mod reorder;
mod state;

pub use collate::*;
pub use filter::*;
pub use state::*;
