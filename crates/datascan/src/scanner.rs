//! Scan orchestration: load, run the detectors, assemble the report.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::check::{
    DEFAULT_Z_THRESHOLD, Detector, DuplicateDetector, MissingValueDetector, OutlierDetector,
};
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::report::{IntegrityReport, ReportAssembler};
use crate::table::Table;

/// Configuration for a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// |z| above which a numeric value is an outlier.
    pub z_thresh: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            z_thresh: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl ScanConfig {
    /// Set the outlier threshold.
    pub fn with_z_thresh(mut self, z_thresh: f64) -> Self {
        self.z_thresh = z_thresh;
        self
    }

    /// Set the parser configuration.
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Check parameters before any file is touched.
    pub fn validate(&self) -> Result<()> {
        OutlierDetector::new(self.z_thresh).map(|_| ())
    }
}

/// Result of scanning a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The integrity findings.
    pub report: IntegrityReport,
}

/// Runs integrity scans.
pub struct Scanner {
    parser: Parser,
    missing: MissingValueDetector,
    duplicates: DuplicateDetector,
    outliers: OutlierDetector,
}

impl Scanner {
    /// Create a scanner with default configuration.
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            missing: MissingValueDetector,
            duplicates: DuplicateDetector,
            outliers: OutlierDetector::default(),
        }
    }

    /// Create a scanner with custom configuration.
    pub fn with_config(config: ScanConfig) -> Result<Self> {
        let outliers = OutlierDetector::new(config.z_thresh)?;

        Ok(Self {
            parser: Parser::with_config(config.parser),
            missing: MissingValueDetector,
            duplicates: DuplicateDetector,
            outliers,
        })
    }

    /// Load a file and scan it.
    ///
    /// A load failure is logged and returned; no detector runs.
    pub fn scan(&self, path: impl AsRef<Path>) -> Result<ScanResult> {
        let path = path.as_ref();

        let (table, source) = match self.parser.parse_file(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load data");
                return Err(e);
            }
        };
        info!(
            path = %path.display(),
            rows = source.row_count,
            columns = source.column_count,
            format = %source.format,
            "data loaded"
        );

        let report = self.scan_table(&table);

        Ok(ScanResult { source, report })
    }

    /// Scan a table that is already in memory.
    pub fn scan_table(&self, table: &Table) -> IntegrityReport {
        let missing_values = self.missing.detect(table);
        info!(
            check = self.missing.name(),
            missing = missing_values.total(),
            "check completed"
        );

        let duplicates = self.duplicates.detect(table);
        info!(
            check = self.duplicates.name(),
            duplicates = duplicates.count(),
            "check completed"
        );

        let outliers = self.outliers.detect(table);
        for (column, rows) in outliers.iter() {
            debug!(column, outliers = rows.len(), "outliers in column");
        }
        info!(
            check = self.outliers.name(),
            z_thresh = self.outliers.z_thresh(),
            columns = outliers.len(),
            outliers = outliers.total(),
            "check completed"
        );

        let report = ReportAssembler::assemble(missing_values, duplicates, outliers);
        info!(clean = report.is_clean(), "report generated");
        report
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_scan_simple_csv() {
        let file = create_test_file("A,B\n1,10\n2,20\n2,20\nNaN,10\n");

        let result = Scanner::new().scan(file.path()).unwrap();

        assert_eq!(result.source.row_count, 4);
        assert_eq!(result.source.column_count, 2);
        assert_eq!(result.report.duplicates().count(), 1);
        assert_eq!(result.report.missing_values().get("A"), Some(1));
        assert_eq!(result.report.missing_values().get("B"), Some(0));
    }

    #[test]
    fn test_invalid_threshold_rejected_before_load() {
        let config = ScanConfig::default().with_z_thresh(-2.0);
        assert!(config.validate().is_err());

        let err = Scanner::with_config(config).err().unwrap();
        assert!(matches!(err, ScanError::InvalidParameter { .. }));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = Scanner::new()
            .scan("/definitely/not/here.csv")
            .unwrap_err();
        assert!(err.is_load_error());
    }

    #[test]
    fn test_scan_table_is_idempotent() {
        let table = Parser::new()
            .parse_bytes(b"x,y\n1,a\n1,a\n2,b\n3,\n")
            .unwrap();
        let scanner = Scanner::new();
        assert_eq!(scanner.scan_table(&table), scanner.scan_table(&table));
    }
}
