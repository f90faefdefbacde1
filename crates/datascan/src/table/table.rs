//! Table-level container enforcing the shared row count.

use std::collections::HashSet;

use crate::error::{Result, ScanError};

use super::column::{Cell, Column, ColumnKind};

/// An ordered set of uniquely named columns sharing one row count.
///
/// Tables are built once and only read afterwards; the detectors take `&Table`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table, checking that names are unique and lengths agree.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ScanError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != row_count {
                return Err(ScanError::RaggedColumn {
                    column: column.name.clone(),
                    expected: row_count,
                    found: column.len(),
                });
            }
        }

        Ok(Self { columns, row_count })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            row_count: 0,
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Columns tagged numeric, in order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Numeric)
    }

    /// Get a specific cell.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell<'_>> {
        self.columns.get(col).and_then(|c| c.data.cell(row))
    }

    /// Iterate over the cells of one row, in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Cell<'_>> {
        self.columns
            .iter()
            .map(move |c| c.data.cell(row).unwrap_or(Cell::Absent))
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}
