//! Inspect command - show how a file loads before scanning it.

use colored::Colorize;
use datascan::{ColumnKind, Parser};

use crate::cli::InspectArgs;

/// Load a file with the same parser flags `scan` accepts and describe it.
pub fn run(args: InspectArgs, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let InspectArgs { file, parser, json } = args;
    let (table, source) = Parser::with_config(parser.into_config()).parse_file(&file)?;

    if json {
        let columns: Vec<_> = table
            .columns()
            .iter()
            .map(|col| {
                serde_json::json!({
                    "name": col.name,
                    "kind": col.kind(),
                    "missing": col.data.absent_count(),
                })
            })
            .collect();
        let summary = serde_json::json!({
            "source": source,
            "columns": columns,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if !quiet {
        eprintln!(
            "{} {}",
            "Inspecting".cyan().bold(),
            file.display().to_string().white()
        );
    }

    println!(
        "{} rows x {} columns ({}, {})",
        source.row_count.to_string().white().bold(),
        source.column_count.to_string().white().bold(),
        source.format,
        source.hash
    );
    println!();

    let width = table
        .column_names()
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);

    println!("{}", "Columns:".yellow().bold());
    for col in table.columns() {
        let kind = match col.kind() {
            ColumnKind::Numeric => col.kind().label().blue(),
            ColumnKind::Categorical => col.kind().label().magenta(),
        };
        let missing = col.data.absent_count();
        let missing = if missing > 0 {
            missing.to_string().yellow()
        } else {
            missing.to_string().normal()
        };
        println!("  {:width$}  {:12} missing: {}", col.name, kind, missing, width = width);
    }

    Ok(())
}
