//! Z-score outlier detection over numeric columns.
//!
//! For each numeric column the present values form a reduced sequence (absent
//! entries dropped, order kept). A value is an outlier when its standardized
//! score against the reduced sequence's sample mean and sample standard
//! deviation exceeds the threshold in magnitude. Flagged positions are mapped
//! back to the column's original row indices.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Detector;
use super::stats::SampleStats;
use crate::error::{Result, ScanError};
use crate::table::{Column, Table};

/// Default |z| above which a value is flagged.
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

/// Outlier row indices per numeric column.
///
/// Only columns with at least one outlier appear as keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    z_thresh: f64,
    columns: IndexMap<String, Vec<usize>>,
}

impl OutlierReport {
    /// Build a report. Entries with empty index lists are dropped.
    pub fn new(z_thresh: f64, mut columns: IndexMap<String, Vec<usize>>) -> Self {
        columns.retain(|_, rows| !rows.is_empty());
        Self { z_thresh, columns }
    }

    /// Outlier rows for a column, if it has any.
    pub fn get(&self, column: &str) -> Option<&[usize]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    /// Returns true if the column has at least one outlier.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Iterate over `(column, rows)` in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.columns
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.as_slice()))
    }

    /// Number of columns with outliers.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no column has outliers.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Outliers across all columns.
    pub fn total(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Threshold used to produce this report.
    pub fn z_thresh(&self) -> f64 {
        self.z_thresh
    }
}

/// Flags numeric values whose |z| exceeds a threshold.
#[derive(Debug, Clone, Copy)]
pub struct OutlierDetector {
    z_thresh: f64,
}

impl OutlierDetector {
    /// Create a detector, rejecting thresholds that are not positive and finite.
    pub fn new(z_thresh: f64) -> Result<Self> {
        validate_threshold(z_thresh)?;
        Ok(Self { z_thresh })
    }

    /// Get the threshold.
    pub fn z_thresh(&self) -> f64 {
        self.z_thresh
    }

    /// Outlier rows for one column, ascending. Empty for categorical columns.
    pub fn column_outliers(&self, column: &Column) -> Vec<usize> {
        let (rows, values): (Vec<usize>, Vec<f64>) = column.present_numbers().unzip();

        let Some(stats) = SampleStats::from_values(&values) else {
            return Vec::new();
        };
        if stats.is_degenerate() {
            return Vec::new();
        }

        rows.into_iter()
            .zip(values)
            .filter(|&(_, v)| stats.z_score(v).abs() > self.z_thresh)
            .map(|(row, _)| row)
            .collect()
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self {
            z_thresh: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl Detector for OutlierDetector {
    type Report = OutlierReport;

    fn name(&self) -> &'static str {
        "outliers"
    }

    fn detect(&self, table: &Table) -> OutlierReport {
        let columns = table
            .numeric_columns()
            .map(|column| (column.name.clone(), self.column_outliers(column)))
            .collect();

        OutlierReport::new(self.z_thresh, columns)
    }
}

/// Check that a z-score threshold is a positive finite number.
pub(crate) fn validate_threshold(z_thresh: f64) -> Result<()> {
    if z_thresh.is_finite() && z_thresh > 0.0 {
        Ok(())
    } else {
        Err(ScanError::InvalidParameter {
            name: "z_thresh",
            value: z_thresh,
            reason: "must be a positive finite number",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(name: &str, values: &[f64]) -> Column {
        Column::numeric(name, values.iter().map(|v| Some(*v)).collect())
    }

    #[test]
    fn test_far_value_flagged() {
        let table = Table::new(vec![numeric("a", &[1.0, 2.0, 1.0, 2.0, 1.0, 50.0])]).unwrap();

        // Six values cap |z| at 5 / sqrt(6) under the sample deviation
        let report = OutlierDetector::new(2.0).unwrap().detect(&table);
        assert_eq!(report.get("a"), Some(&[5][..]));
    }

    #[test]
    fn test_default_threshold() {
        let mut values = vec![10.0; 15];
        values.extend([11.0, 9.0, 10.0, 11.0, 9.0]);
        values.push(100.0);
        let table = Table::new(vec![numeric("a", &values)]).unwrap();

        let report = OutlierDetector::default().detect(&table);
        assert_eq!(report.get("a"), Some(&[20][..]));
        assert_eq!(report.z_thresh(), DEFAULT_Z_THRESHOLD);
    }

    #[test]
    fn test_indices_are_original_rows() {
        // Absent entries shift reduced positions; the report must not
        let mut values: Vec<Option<f64>> = vec![None, None];
        values.extend((0..20).map(|i| Some(10.0 + (i % 2) as f64)));
        values.push(None);
        values.push(Some(90.0));
        let table = Table::new(vec![Column::numeric("a", values)]).unwrap();

        let report = OutlierDetector::default().detect(&table);
        assert_eq!(report.get("a"), Some(&[23][..]));
    }

    #[test]
    fn test_constant_column_has_no_outliers() {
        let table = Table::new(vec![numeric("a", &[7.0; 12])]).unwrap();
        let report = OutlierDetector::new(0.5).unwrap().detect(&table);
        assert!(!report.contains("a"));
        assert!(report.is_empty());
    }

    #[test]
    fn test_short_columns_skipped() {
        let table = Table::new(vec![
            Column::numeric("one", vec![Some(3.0), None]),
            Column::numeric("none", vec![None, None]),
        ])
        .unwrap();
        let report = OutlierDetector::new(0.1).unwrap().detect(&table);
        assert!(report.is_empty());
    }

    #[test]
    fn test_categorical_columns_ignored() {
        let table = Table::new(vec![
            Column::categorical(
                "label",
                ["1", "1", "1", "1", "999"].iter().map(|v| Some(v.to_string())).collect(),
            ),
            numeric("v", &[1.0, 1.0, 1.0, 1.0, 999.0]),
        ])
        .unwrap();

        let report = OutlierDetector::new(1.5).unwrap().detect(&table);
        assert!(!report.contains("label"));
        assert_eq!(report.get("v"), Some(&[4][..]));
    }

    #[test]
    fn test_clean_columns_absent_from_report() {
        let table = Table::new(vec![
            numeric("clean", &[1.0, 2.0, 3.0, 4.0, 5.0]),
            numeric("dirty", &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 40.0]),
        ])
        .unwrap();

        let report = OutlierDetector::default().detect(&table);
        assert!(!report.contains("clean"));
        assert_eq!(report.len(), 1);
        assert_eq!(report.total(), 1);
        assert_eq!(report.iter().next().map(|(name, _)| name), Some("dirty"));
    }

    #[test]
    fn test_both_tails_flagged_in_row_order() {
        let mut values = vec![0.0; 30];
        values[4] = 50.0;
        values[17] = -50.0;
        let table = Table::new(vec![numeric("a", &values)]).unwrap();

        let report = OutlierDetector::default().detect(&table);
        assert_eq!(report.get("a"), Some(&[4, 17][..]));
    }

    #[test]
    fn test_invalid_thresholds() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = OutlierDetector::new(bad).unwrap_err();
            assert!(matches!(err, ScanError::InvalidParameter { name: "z_thresh", .. }));
        }
        assert!(OutlierDetector::new(0.01).is_ok());
    }

    #[test]
    fn test_report_drops_empty_entries() {
        let mut columns = IndexMap::new();
        columns.insert("a".to_string(), Vec::new());
        columns.insert("b".to_string(), vec![3]);
        let report = OutlierReport::new(3.0, columns);
        assert!(!report.contains("a"));
        assert_eq!(report.get("b"), Some(&[3][..]));
    }

    #[test]
    fn test_extreme_magnitudes_still_flagged() {
        let mut values = vec![1e307; 30];
        values.push(-1.7e308);
        let table = Table::new(vec![numeric("a", &values)]).unwrap();

        let report = OutlierDetector::default().detect(&table);
        assert_eq!(report.get("a"), Some(&[30][..]));
    }
}
