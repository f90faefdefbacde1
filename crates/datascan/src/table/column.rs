//! Column model with an explicit kind tag per column.

use serde::{Deserialize, Serialize};

/// Kind of values a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Floating-point numbers.
    Numeric,
    /// Text values.
    Categorical,
}

impl ColumnKind {
    /// Returns true if this kind is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

/// Cell storage for a column. `None` marks an absent entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    /// Number of cells, absent ones included.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Categorical(values) => values.len(),
        }
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The kind tag for this storage.
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
        }
    }

    /// Get the cell at `row`, or `None` if the row is out of bounds.
    pub fn cell(&self, row: usize) -> Option<Cell<'_>> {
        match self {
            ColumnData::Numeric(values) => values
                .get(row)
                .map(|v| v.map_or(Cell::Absent, Cell::Number)),
            ColumnData::Categorical(values) => values
                .get(row)
                .map(|v| v.as_deref().map_or(Cell::Absent, Cell::Text)),
        }
    }

    /// Count of absent cells.
    pub fn absent_count(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Categorical(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }
}

/// A borrowed view of a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Absent,
    Number(f64),
    Text(&'a str),
}

impl Cell<'_> {
    /// Returns true for an absent entry.
    pub fn is_absent(&self) -> bool {
        matches!(self, Cell::Absent)
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Cell values.
    pub data: ColumnData,
}

impl Column {
    /// Create a numeric column.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    /// Create a categorical column.
    pub fn categorical(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Categorical(values),
        }
    }

    /// Get the column kind.
    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Numeric cells, if this is a numeric column.
    pub fn numeric_values(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Categorical(_) => None,
        }
    }

    /// Present numeric values paired with their row index, in row order.
    ///
    /// Yields nothing for a categorical column.
    pub fn present_numbers(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.numeric_values()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(row, v)| v.map(|v| (row, v)))
    }
}
