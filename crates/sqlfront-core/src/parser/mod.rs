//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.

mod error;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;

pub use error::ParseError;
pub use parser::Parser;

use crate::ast::Statement;

/// Parses every statement in `source`.
///
/// Malformed statements appear as [`Statement::Error`] in the returned list;
/// their diagnostics are returned alongside, in source order.
#[must_use]
pub fn parse_statements(source: &str) -> (Vec<Statement>, Vec<ParseError>) {
    let mut parser = Parser::new(source);
    let mut statements = Vec::new();
    while !parser.is_at_end() {
        statements.push(parser.next_statement());
    }
    (statements, parser.take_errors())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_statements_keeps_going_after_errors() {
        let (statements, errors) =
            parse_statements("DROP TABLE a; DROP TABLE; DROP TABLE b;");
        assert_eq!(statements.len(), 3);
        assert!(!statements[0].is_error());
        assert!(statements[1].is_error());
        assert!(!statements[2].is_error());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_parse_statements_empty_input() {
        let (statements, errors) = parse_statements("  -- nothing here\n");
        assert!(statements.is_empty());
        assert!(errors.is_empty());
    }
}
