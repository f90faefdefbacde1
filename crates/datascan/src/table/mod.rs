//! Typed in-memory table consumed by the detectors.

mod column;
mod table;

pub use column::{Cell, Column, ColumnData, ColumnKind};
pub use table::Table;
