//! datascan: integrity scanner for tabular datasets.
//!
//! A scan checks a table for three kinds of issues and reports them in a
//! fixed order:
//!
//! - **Missing values**: absent entries per column
//! - **Duplicate rows**: rows identical to an earlier row in every column
//! - **Outliers**: numeric values whose z-score exceeds a threshold
//!
//! The detectors are pure functions of a read-only [`Table`]; loading a file
//! and logging are handled around them.
//!
//! # Example
//!
//! ```no_run
//! use datascan::{ScanConfig, Scanner};
//!
//! let scanner = Scanner::with_config(ScanConfig::default().with_z_thresh(2.5)).unwrap();
//! let result = scanner.scan("measurements.csv").unwrap();
//!
//! print!("{}", result.report);
//! ```

pub mod check;
pub mod error;
pub mod input;
pub mod report;
pub mod table;

mod scanner;

pub use crate::scanner::{ScanConfig, ScanResult, Scanner};
pub use check::{
    DEFAULT_Z_THRESHOLD, Detector, DuplicateDetector, DuplicateReport, DuplicateRow,
    MissingValueDetector, MissingValueReport, OutlierDetector, OutlierReport,
};
pub use error::{Result, ScanError};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use report::{IntegrityReport, ReportAssembler};
pub use table::{Cell, Column, ColumnData, ColumnKind, Table};
