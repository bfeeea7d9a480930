//! sqlfront CLI
//!
//! Parses SQL files (or standard input) and prints each statement as
//! canonical SQL, a debug tree or JSON. Syntax errors are reported on
//! standard error with their line and column.

mod error;
mod report;

use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crate::error::CliError;
use crate::report::{Format, Summary};

/// Parse SQL statements and print their syntax trees.
#[derive(Parser)]
#[command(name = "sqlfront")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL files to parse (standard input if none are given).
    files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, env = "SQLFRONT_FORMAT", default_value_t = Format::Text)]
    format: Format,

    /// Stop at the first statement that fails to parse.
    #[arg(long)]
    fail_fast: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Log level (overrides --verbose).
    #[arg(long, env = "SQLFRONT_LOG")]
    log_level: Option<Level>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = cli.log_level.unwrap_or(if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    });
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let inputs = report::read_inputs(&cli.files)?;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let mut total = Summary::default();
    for input in &inputs {
        let summary = report::process(input, cli.format, cli.fail_fast, &mut out, &mut err)?;
        total.statements += summary.statements;
        total.errors += summary.errors;
        if cli.fail_fast && summary.errors > 0 {
            break;
        }
    }

    info!(
        inputs = inputs.len(),
        statements = total.statements,
        errors = total.errors,
        "Done"
    );

    if total.errors > 0 {
        return Err(CliError::Syntax {
            count: total.errors,
        }
        .into());
    }
    Ok(())
}
