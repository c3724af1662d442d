//! Typed models

mod column;
mod record;
mod record_serde;
mod reference;
mod row;
mod value;

pub use column::*;
pub use record::*;
pub use reference::*;
pub use row::*;
pub use value::*;
