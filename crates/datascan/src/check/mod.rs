//! Integrity detectors.
//!
//! Each detector is a pure function of a [`Table`]: it reads the table, never
//! mutates it, and returns its own report type. Detectors do not depend on one
//! another and may run in any order.

mod duplicates;
mod missing;
mod outliers;
mod stats;

pub use duplicates::{DuplicateDetector, DuplicateReport, DuplicateRow};
pub use missing::{MissingValueDetector, MissingValueReport};
pub use outliers::{DEFAULT_Z_THRESHOLD, OutlierDetector, OutlierReport};
pub use stats::SampleStats;

use crate::table::Table;

/// Trait for integrity detectors.
pub trait Detector {
    /// Findings produced by this detector.
    type Report;

    /// Short identifier used in log events.
    fn name(&self) -> &'static str;

    /// Run the detector over a table.
    fn detect(&self, table: &Table) -> Self::Report;
}
