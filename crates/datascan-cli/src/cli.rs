//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use datascan::ParserConfig;
use std::path::PathBuf;

/// datascan: scan tabular data for missing values, duplicate rows and outliers
#[derive(Parser)]
#[command(name = "datascan")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors and suppress status lines
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the integrity checks and print the report
    Scan(ScanArgs),

    /// Show the loaded table's shape and inferred column kinds
    Inspect(InspectArgs),
}

/// Loading options shared by every command that reads a file.
#[derive(Args)]
pub struct ParserArgs {
    /// Field delimiter (auto-detected when omitted; use "tab" for TSV)
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Treat the first row as data rather than a header
    #[arg(long)]
    pub no_header: bool,

    /// Read at most this many data rows
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Extra cell value to treat as missing (repeatable)
    #[arg(long = "null-marker", value_name = "VALUE")]
    pub null_markers: Vec<String>,
}

impl ParserArgs {
    /// Parser configuration: the defaults overridden by these flags.
    pub fn into_config(self) -> ParserConfig {
        let mut config = ParserConfig {
            delimiter: self.delimiter,
            has_header: !self.no_header,
            max_rows: self.max_rows,
            ..ParserConfig::default()
        };
        config.null_markers.extend(self.null_markers);
        config
    }
}

#[derive(Args)]
pub struct ScanArgs {
    /// Path to the data file (CSV/TSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub parser: ParserArgs,

    /// Absolute z-score above which a value is an outlier
    #[arg(short, long, default_value_t = datascan::DEFAULT_Z_THRESHOLD)]
    pub z_thresh: f64,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// List each duplicate row with the row it repeats
    #[arg(long)]
    pub show_duplicates: bool,

    /// Exit with status 2 when any issue is found
    #[arg(long)]
    pub fail_on_issues: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Path to the data file (CSV/TSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub parser: ParserArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse a single-byte delimiter. Accepts `tab` and `\t` for TSV.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    s
                )),
            }
        }
    }
}
