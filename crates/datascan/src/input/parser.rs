//! Delimited-file loader with delimiter detection and column kind inference.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{SourceMetadata, format_for_delimiter};
use crate::error::{Result, ScanError};
use crate::table::{Column, Table};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Records sampled per candidate delimiter.
const SAMPLE_RECORDS: usize = 10;

/// Cell spellings treated as absent by default (matched after trimming).
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#NA", "#N/A N/A", "-1.#IND", "1.#IND", "-1.#QNAN", "1.#QNAN",
];

/// Path reported in errors for in-memory input.
const MEMORY_SOURCE: &str = "<memory>";

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Cell values that mark an absent entry. Blank cells are always absent.
    pub null_markers: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ParserConfig {
    /// Check if a raw cell represents an absent value.
    pub fn is_null_value(&self, value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty() || self.null_markers.iter().any(|m| m == trimmed)
    }
}

/// Loads delimited files into [`Table`]s.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a file and return the table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();
        let io_error = |source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_error)?;
        let size_bytes = file.metadata().map_err(io_error)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_error)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = self.resolve_delimiter(&contents, path)?;
        debug!(path = %path.display(), delimiter = %(delimiter as char).escape_default(), "using delimiter");

        let table = self.parse_delimited(&contents, delimiter, path)?;

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format_for_delimiter(delimiter).to_string(),
            table.row_count(),
            table.column_count(),
            table.numeric_columns().count(),
        );

        Ok((table, metadata))
    }

    /// Parse in-memory bytes.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let origin = PathBuf::from(MEMORY_SOURCE);
        let delimiter = self.resolve_delimiter(bytes, &origin)?;
        self.parse_delimited(bytes, delimiter, &origin)
    }

    /// The configured delimiter, or the detected one.
    fn resolve_delimiter(&self, bytes: &[u8], origin: &Path) -> Result<u8> {
        if let Some(delimiter) = self.config.delimiter {
            return Ok(delimiter);
        }
        detect_delimiter(bytes, self.config.quote).ok_or_else(|| ScanError::EmptyData {
            path: origin.to_path_buf(),
            reason: "no lines to analyze".to_string(),
        })
    }

    fn parse_delimited(&self, bytes: &[u8], delimiter: u8, origin: &Path) -> Result<Table> {
        let csv_error = |source| ScanError::Csv {
            path: origin.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        // Without a header row the reader still yields the first record below.
        let first = reader.headers().map_err(csv_error)?.clone();
        if first.is_empty() {
            return Err(ScanError::EmptyData {
                path: origin.to_path_buf(),
                reason: "no columns found".to_string(),
            });
        }

        let headers = if self.config.has_header {
            unique_names(first.iter())
        } else {
            (0..first.len()).map(|i| format!("column_{}", i + 1)).collect()
        };

        let width = headers.len();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result.map_err(csv_error)?;
            if record.len() != width {
                debug!(row = row_idx, fields = record.len(), expected = width, "ragged row");
            }

            // Short rows are padded with absent cells; extra fields are dropped.
            for (col_idx, column) in cells.iter_mut().enumerate() {
                let cell = record
                    .get(col_idx)
                    .filter(|v| !self.config.is_null_value(v))
                    .map(str::to_string);
                column.push(cell);
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| build_column(name, values))
            .collect();

        Table::new(columns)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a present cell as a finite number.
fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Tag a column numeric when it has present cells and all of them parse.
fn build_column(name: String, values: Vec<Option<String>>) -> Column {
    let mut present = values.iter().flatten().peekable();
    let numeric = present.peek().is_some() && present.all(|v| parse_number(v).is_some());

    if numeric {
        let numbers = values
            .iter()
            .map(|v| v.as_deref().and_then(parse_number))
            .collect();
        Column::numeric(name, numbers)
    } else {
        Column::categorical(name, values)
    }
}

/// Make header names unique: blanks become `Unnamed: <i>`, repeats get `.1`, `.2`, ...
fn unique_names<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let raw: Vec<String> = raw
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim();
            if name.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut taken: HashSet<String> = raw.iter().cloned().collect();
    let mut emitted: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(raw.len());

    for name in raw {
        if emitted.insert(name.clone()) {
            names.push(name);
            continue;
        }
        let mut suffix = 1;
        let renamed = loop {
            let candidate = format!("{}.{}", name, suffix);
            if !taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        taken.insert(renamed.clone());
        emitted.insert(renamed.clone());
        names.push(renamed);
    }

    names
}

/// Detect the delimiter by reading a sample of records with each candidate.
///
/// The candidate whose records split most consistently into the most fields
/// wins; ties go to the earlier entry of [`DELIMITERS`]. Quoting follows the
/// real reader. Returns `None` when there are no non-blank lines.
fn detect_delimiter(bytes: &[u8], quote: u8) -> Option<u8> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    let mut best: Option<(u8, usize)> = None;
    for &delimiter in DELIMITERS {
        let score = delimiter_score(&separator_counts(bytes, delimiter, quote), delimiter);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((delimiter, score));
        }
    }

    Some(best.map_or(b',', |(delimiter, _)| delimiter))
}

/// Separators per sampled record, as seen by a `csv` reader using `delimiter`.
fn separator_counts(bytes: &[u8], delimiter: u8, quote: u8) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quote(quote)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes)
        .into_byte_records()
        .map_while(|record| record.ok())
        .filter(|record| !record.iter().all(|field| field.trim_ascii().is_empty()))
        .take(SAMPLE_RECORDS)
        .map(|record| record.len() - 1)
        .collect()
}

/// Rank one candidate. Zero means the delimiter never splits the first record.
fn delimiter_score(counts: &[usize], delimiter: u8) -> usize {
    let Some(&first) = counts.first() else {
        return 0;
    };
    if first == 0 {
        return 0;
    }

    let spread = counts.iter().max().unwrap_or(&first) - counts.iter().min().unwrap_or(&first);
    match spread {
        // Tab wins a consistent tie.
        0 => first * 1000 + if delimiter == b'\t' { 100 } else { 0 },
        1 => first * 100,
        _ => first,
    }
}
