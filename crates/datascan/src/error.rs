//! Error types for the datascan library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for datascan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error decoding delimited data.
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The source has no header and no rows to build columns from.
    #[error("Empty data in '{path}': {reason}")]
    EmptyData { path: PathBuf, reason: String },

    /// A column's length disagrees with the rest of the table.
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Two columns share a name.
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// A detector parameter is out of its valid domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScanError {
    /// Returns true for failures raised while loading a source file.
    ///
    /// A load failure aborts the whole scan; no detector runs.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ScanError::Io { .. } | ScanError::Csv { .. } | ScanError::EmptyData { .. }
        )
    }

    /// The source path, when the error came from loading one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ScanError::Io { path, .. }
            | ScanError::Csv { path, .. }
            | ScanError::EmptyData { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for datascan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_classification() {
        let io = ScanError::Io {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(io.is_load_error());
        assert_eq!(io.path(), Some(std::path::Path::new("missing.csv")));

        let param = ScanError::InvalidParameter {
            name: "z_thresh",
            value: -1.0,
            reason: "must be a positive finite number",
        };
        assert!(!param.is_load_error());
        assert!(param.path().is_none());
    }

    #[test]
    fn test_error_messages_name_the_source() {
        let err = ScanError::EmptyData {
            path: PathBuf::from("data/empty.csv"),
            reason: "no columns found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/empty.csv"));
        assert!(msg.contains("no columns found"));
    }
}
