//! Fully-identical row detection.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

use super::Detector;
use crate::table::{Cell, Table};

/// A row that repeats an earlier row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRow {
    /// Index of the repeating row.
    pub row: usize,
    /// Index of the first row with the same values.
    pub first_occurrence: usize,
}

/// Rows that repeat an earlier row across every column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateReport {
    count: usize,
    rows: Vec<DuplicateRow>,
}

impl DuplicateReport {
    /// Build a report from duplicate rows in row order.
    pub fn new(rows: Vec<DuplicateRow>) -> Self {
        Self {
            count: rows.len(),
            rows,
        }
    }

    /// Number of duplicate rows (first occurrences excluded).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Duplicate rows in row order.
    pub fn rows(&self) -> &[DuplicateRow] {
        &self.rows
    }

    /// Indices of the duplicate rows, ascending.
    pub fn indices(&self) -> Vec<usize> {
        self.rows.iter().map(|d| d.row).collect()
    }

    /// Returns true if no row repeats an earlier one.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Hashable form of a cell. Numbers compare by exact value.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Absent,
    Number(u64),
    Text(&'a str),
}

impl<'a> From<Cell<'a>> for CellKey<'a> {
    fn from(cell: Cell<'a>) -> Self {
        match cell {
            Cell::Absent => CellKey::Absent,
            // -0.0 and 0.0 are equal values with different bit patterns
            Cell::Number(v) if v == 0.0 => CellKey::Number(0f64.to_bits()),
            Cell::Number(v) => CellKey::Number(v.to_bits()),
            Cell::Text(s) => CellKey::Text(s),
        }
    }
}

/// Counts and locates rows identical to an earlier row.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateDetector;

impl Detector for DuplicateDetector {
    type Report = DuplicateReport;

    fn name(&self) -> &'static str {
        "duplicate_rows"
    }

    fn detect(&self, table: &Table) -> DuplicateReport {
        let mut first_seen: IndexMap<Vec<CellKey<'_>>, usize> = IndexMap::new();
        let mut duplicates = Vec::new();

        for row in 0..table.row_count() {
            let key: Vec<CellKey<'_>> = table.row(row).map(CellKey::from).collect();
            match first_seen.entry(key) {
                Entry::Occupied(entry) => duplicates.push(DuplicateRow {
                    row,
                    first_occurrence: *entry.get(),
                }),
                Entry::Vacant(entry) => {
                    entry.insert(row);
                }
            }
        }

        DuplicateReport::new(duplicates)
    }
}
