//! Reading SQL inputs, rendering statements and reporting diagnostics.

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::ValueEnum;
use sqlfront_core::{ParseError, Parser, Statement};
use tracing::debug;

use crate::error::{CliError, Result};

/// Name used for standard input in diagnostics.
pub const STDIN_NAME: &str = "<stdin>";

/// How parsed statements are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Canonical SQL text.
    Text,
    /// Rust debug representation of the syntax tree.
    Debug,
    /// Pretty-printed JSON syntax tree.
    Json,
}

/// A named chunk of SQL source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// File path or [`STDIN_NAME`].
    pub name: String,
    /// SQL text.
    pub source: String,
}

/// Outcome of processing one input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Statements parsed successfully.
    pub statements: usize,
    /// Diagnostics reported.
    pub errors: usize,
}

/// Reads every file in order, or standard input when `files` is empty.
pub fn read_inputs(files: &[PathBuf]) -> Result<Vec<Input>> {
    if files.is_empty() {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(CliError::Stdin)?;
        return Ok(vec![Input {
            name: STDIN_NAME.to_string(),
            source,
        }]);
    }

    files
        .iter()
        .map(|path| {
            let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            Ok(Input {
                name: path.display().to_string(),
                source,
            })
        })
        .collect()
}

/// Renders a statement in the requested format.
pub fn render_statement(statement: &Statement, format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => statement.to_string(),
        Format::Debug => format!("{statement:#?}"),
        Format::Json => serde_json::to_string_pretty(statement)?,
    })
}

/// Converts a byte offset into a 1-based line and column.
///
/// Columns count characters, not bytes. Offsets past the end of the source
/// point just after the last character.
#[must_use]
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Formats a diagnostic as `name:line:column: error: message`.
#[must_use]
pub fn format_diagnostic(name: &str, source: &str, error: &ParseError) -> String {
    let (line, column) = line_column(source, error.span.start);
    format!("{name}:{line}:{column}: error: {error}")
}

/// Parses every statement of `input`, writing rendered statements to `out`
/// and diagnostics to `err`.
///
/// With `fail_fast` set, processing stops at the first failed statement.
pub fn process(
    input: &Input,
    format: Format,
    fail_fast: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Summary> {
    debug!(input = %input.name, bytes = input.source.len(), "Parsing input");

    let mut parser = Parser::new(&input.source);
    let mut summary = Summary::default();

    while !parser.is_at_end() {
        let statement = parser.next_statement();
        if statement.is_error() {
            for error in parser.take_errors() {
                writeln!(err, "{}", format_diagnostic(&input.name, &input.source, &error))?;
                summary.errors += 1;
            }
            if fail_fast {
                debug!(input = %input.name, "Stopping at first error");
                break;
            }
            continue;
        }

        writeln!(out, "{}", render_statement(&statement, format)?)?;
        summary.statements += 1;
    }

    debug!(
        input = %input.name,
        statements = summary.statements,
        errors = summary.errors,
        "Finished input"
    );
    Ok(summary)
}
