#![allow(dead_code)]

use sqlfront_core::ast::{
    CreateTableStatement, DeleteStatement, DropTableStatement, Expression, SelectStatement,
    Statement,
};
use sqlfront_core::{ParseError, Parser};

pub fn parse(sql: &str) -> Statement {
    let mut parser = Parser::new(sql);
    let statement = parser.next_statement();
    assert!(
        !parser.has_errors(),
        "Failed to parse: {sql}\nErrors: {:?}",
        parser.errors()
    );
    statement
}

/// Parses the first statement of `sql` and returns its single diagnostic.
pub fn parse_err(sql: &str) -> ParseError {
    let mut parser = Parser::new(sql);
    let statement = parser.next_statement();
    assert!(
        statement.is_error(),
        "Expected parse error for: {sql}\nGot: {statement:?}"
    );
    let mut errors = parser.take_errors();
    assert_eq!(errors.len(), 1, "Expected one error for: {sql}");
    errors.remove(0)
}

pub fn parse_create_table(sql: &str) -> CreateTableStatement {
    match parse(sql) {
        Statement::CreateTable(c) => c,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

pub fn parse_drop_table(sql: &str) -> DropTableStatement {
    match parse(sql) {
        Statement::DropTable(d) => d,
        other => panic!("Expected DROP TABLE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse(sql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Parses a standalone expression that must consume the whole input.
pub fn parse_expr(sql: &str) -> Expression {
    let mut parser = Parser::new(sql);
    let expression = parser.parse_expression();
    assert!(
        !parser.has_errors(),
        "Failed to parse expression: {sql}\nErrors: {:?}",
        parser.errors()
    );
    assert!(parser.is_at_end(), "Trailing input after expression: {sql}");
    expression
}

/// Parses `sql` as the WHERE clause of a SELECT and returns it.
pub fn parse_where(condition: &str) -> Expression {
    parse_select(&format!("SELECT * FROM t WHERE {condition};"))
        .where_clause()
        .cloned()
        .expect("WHERE clause")
}

/// Verifies that rendering is faithful: re-parsing `parse(sql).to_string()`
/// yields an equal tree, and rendering that tree again is a fixed point.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the tree.\n  Input:    {sql}\n  Rendered: {rendered1}"
    );
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
