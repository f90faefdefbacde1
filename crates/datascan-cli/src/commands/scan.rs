//! Scan command - run the integrity checks on a data file.

use colored::Colorize;
use datascan::{ScanConfig, ScanResult, Scanner};

use crate::cli::ScanArgs;

/// Run a scan.
///
/// Returns `false` only when `--fail-on-issues` is set and the report found
/// something; the caller turns that into a non-zero exit status.
pub fn run(args: ScanArgs, quiet: bool) -> Result<bool, Box<dyn std::error::Error>> {
    let config = ScanConfig::default()
        .with_parser(args.parser.into_config())
        .with_z_thresh(args.z_thresh);
    let scanner = Scanner::with_config(config)?;

    if !quiet && !args.json {
        eprintln!(
            "{} {}",
            "Scanning".cyan().bold(),
            args.file.display().to_string().white()
        );
    }

    let result = scanner.scan(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", result.report);
        if args.show_duplicates {
            print_duplicates(&result);
        }
        if !quiet {
            print_summary(&result);
        }
    }

    Ok(!args.fail_on_issues || result.report.is_clean())
}

fn print_duplicates(result: &ScanResult) {
    let duplicates = result.report.duplicates();
    if duplicates.is_empty() {
        return;
    }

    println!();
    println!("Duplicate Row Details:");
    for dup in duplicates.rows() {
        println!("row {} repeats row {}", dup.row, dup.first_occurrence);
    }
}

/// One-line verdict on stderr so stdout stays the bare report.
fn print_summary(result: &ScanResult) {
    let report = &result.report;
    eprintln!();

    if report.is_clean() {
        eprintln!(
            "{} {} rows, {} columns, no issues found",
            "✓".green().bold(),
            result.source.row_count,
            result.source.column_count
        );
        return;
    }

    eprintln!(
        "{} {} missing values, {} duplicate rows, {} outliers in {} columns",
        "!".yellow().bold(),
        report.missing_values().total().to_string().yellow(),
        report.duplicates().count().to_string().yellow(),
        report.outliers().total().to_string().yellow(),
        report.outliers().len()
    );
}
