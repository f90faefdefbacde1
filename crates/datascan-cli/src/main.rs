//! datascan CLI - data integrity scanning tool.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Exit status when `--fail-on-issues` is set and the report is not clean.
const ISSUES_FOUND: i32 = 2;

/// Install the tracing subscriber. Logs go to stderr; `RUST_LOG` wins over flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Scan(args) => commands::scan::run(args, cli.quiet).map(|passed| {
            if !passed {
                std::process::exit(ISSUES_FOUND);
            }
        }),

        Commands::Inspect(args) => commands::inspect::run(args, cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
