//! Per-column absent entry counts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Detector;
use crate::table::Table;

/// Absent-entry counts, one per column in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingValueReport {
    row_count: usize,
    counts: IndexMap<String, usize>,
}

impl MissingValueReport {
    /// Build a report from `(column, count)` pairs.
    pub fn new(row_count: usize, counts: IndexMap<String, usize>) -> Self {
        Self { row_count, counts }
    }

    /// Absent count for a column.
    pub fn get(&self, column: &str) -> Option<usize> {
        self.counts.get(column).copied()
    }

    /// Iterate over `(column, count)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Number of columns covered.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if the table had no columns.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Row count of the scanned table.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Absent entries across all columns.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Fraction of a column's rows that are absent; 0.0 for an empty table.
    pub fn ratio(&self, column: &str) -> Option<f64> {
        let count = self.get(column)?;
        if self.row_count == 0 {
            Some(0.0)
        } else {
            Some(count as f64 / self.row_count as f64)
        }
    }

    /// Columns with at least one absent entry.
    pub fn columns_with_missing(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, count)| *count > 0)
            .map(|(name, _)| name)
    }
}

/// Counts absent entries per column.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingValueDetector;

impl Detector for MissingValueDetector {
    type Report = MissingValueReport;

    fn name(&self) -> &'static str {
        "missing_values"
    }

    fn detect(&self, table: &Table) -> MissingValueReport {
        let counts = table
            .columns()
            .iter()
            .map(|column| (column.name.clone(), column.data.absent_count()))
            .collect();

        MissingValueReport::new(table.row_count(), counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_counts_in_column_order() {
        let table = Table::new(vec![
            Column::categorical("z", vec![None, None, Some("a".to_string())]),
            Column::numeric("a", vec![Some(1.0), None, Some(2.0)]),
            Column::numeric("m", vec![Some(1.0), Some(2.0), Some(3.0)]),
        ])
        .unwrap();

        let report = MissingValueDetector.detect(&table);

        let entries: Vec<(&str, usize)> = report.iter().collect();
        assert_eq!(entries, vec![("z", 2), ("a", 1), ("m", 0)]);
        assert_eq!(report.total(), 3);
        assert_eq!(report.row_count(), 3);
        assert_eq!(report.columns_with_missing().collect::<Vec<_>>(), vec!["z", "a"]);
    }

    #[test]
    fn test_ratio() {
        let table = Table::new(vec![Column::numeric(
            "a",
            vec![Some(1.0), None, None, Some(2.0)],
        )])
        .unwrap();
        let report = MissingValueDetector.detect(&table);
        assert_eq!(report.ratio("a"), Some(0.5));
        assert_eq!(report.ratio("b"), None);
    }

    #[test]
    fn test_empty_table_yields_zero_counts() {
        let table = Table::new(vec![
            Column::numeric("a", Vec::new()),
            Column::categorical("b", Vec::new()),
        ])
        .unwrap();

        let report = MissingValueDetector.detect(&table);
        assert_eq!(report.len(), 2);
        assert_eq!(report.get("a"), Some(0));
        assert_eq!(report.get("b"), Some(0));
        assert_eq!(report.ratio("a"), Some(0.0));
    }
}
