//! Consolidated integrity report and its renderings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::check::{DuplicateReport, MissingValueReport, OutlierReport};
use crate::error::Result;

const TITLE: &str = "Data Integrity Report";
const MISSING_HEADER: &str = "Missing Values:";
const DUPLICATES_LABEL: &str = "Duplicate Rows:";
const OUTLIERS_HEADER: &str = "Outliers:";

/// Gap between a column name and its count in the missing-values section.
const COLUMN_GAP: usize = 4;

/// Findings of one scan, in fixed section order.
///
/// Built once by [`ReportAssembler`]; there are no mutating methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    missing_values: MissingValueReport,
    duplicates: DuplicateReport,
    outliers: OutlierReport,
}

impl IntegrityReport {
    /// Missing-value section.
    pub fn missing_values(&self) -> &MissingValueReport {
        &self.missing_values
    }

    /// Duplicate-row section.
    pub fn duplicates(&self) -> &DuplicateReport {
        &self.duplicates
    }

    /// Outlier section.
    pub fn outliers(&self) -> &OutlierReport {
        &self.outliers
    }

    /// Returns true if no section found anything.
    pub fn is_clean(&self) -> bool {
        self.missing_values.total() == 0 && self.duplicates.is_empty() && self.outliers.is_empty()
    }

    /// Render the plain-text report.
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        writeln!(f, "{}", "=".repeat(TITLE.len()))?;

        writeln!(f, "{}", MISSING_HEADER)?;
        let name_width = self
            .missing_values
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        let count_width = self
            .missing_values
            .iter()
            .map(|(_, count)| count.to_string().len())
            .max()
            .unwrap_or(0);
        for (name, count) in self.missing_values.iter() {
            writeln!(
                f,
                "{:<name_width$}{:gap$}{:>count_width$}",
                name,
                "",
                count,
                gap = COLUMN_GAP
            )?;
        }
        writeln!(f)?;

        writeln!(f, "{} {}", DUPLICATES_LABEL, self.duplicates.count())?;
        writeln!(f)?;

        writeln!(f, "{}", OUTLIERS_HEADER)?;
        for (name, rows) in self.outliers.iter() {
            writeln!(
                f,
                "{}: {} outliers at indices {}",
                name,
                rows.len(),
                IndexList(rows)
            )?;
        }

        Ok(())
    }
}

/// Renders row indices as `[a, b, c]`.
struct IndexList<'a>(&'a [usize]);

impl fmt::Display for IndexList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", row)?;
        }
        f.write_str("]")
    }
}

/// Consolidates detector findings into an [`IntegrityReport`].
pub struct ReportAssembler;

impl ReportAssembler {
    /// Combine the three reports. Nothing is recomputed.
    pub fn assemble(
        missing_values: MissingValueReport,
        duplicates: DuplicateReport,
        outliers: OutlierReport,
    ) -> IntegrityReport {
        IntegrityReport {
            missing_values,
            duplicates,
            outliers,
        }
    }
}
