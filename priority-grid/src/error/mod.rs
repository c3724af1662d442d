//! Error types

mod field;
mod snapshot;
mod write;

pub use field::*;
pub use snapshot::*;
pub use write::*;
