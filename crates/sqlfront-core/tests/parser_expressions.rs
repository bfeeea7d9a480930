//! Tests for primary expressions: literals, names, CAST, CASE, COLLATE,
//! parenthesized lists and unary operators.

mod common;
use common::*;

use sqlfront_core::Parser;
use sqlfront_core::ast::{BinaryOperator, Expression, UnaryOperator};

// --- Literals ---

#[test]
fn numeric_literals() {
    assert_eq!(parse_expr("15"), Expression::numeric(15.0));
    assert_eq!(parse_expr("1.5"), Expression::numeric(1.5));
    assert_eq!(parse_expr(".5"), Expression::numeric(0.5));
    assert_eq!(parse_expr("1e3"), Expression::numeric(1000.0));
    assert_eq!(parse_expr("0xff"), Expression::numeric(255.0));
    assert_eq!(parse_expr("0XFF"), Expression::numeric(255.0));
}

#[test]
fn string_literals() {
    assert_eq!(parse_expr("'hello'"), Expression::string("hello"));
    assert_eq!(parse_expr("''"), Expression::string(""));
    assert_eq!(parse_expr("'it''s'"), Expression::string("it's"));
}

#[test]
fn blob_literals() {
    assert_eq!(
        parse_expr("X'DEADbeef'"),
        Expression::BlobLiteral(vec![0xde, 0xad, 0xbe, 0xef])
    );
    assert_eq!(parse_expr("x''"), Expression::BlobLiteral(vec![]));
}

#[test]
fn null_literal() {
    assert_eq!(parse_expr("NULL"), Expression::NullLiteral);
    assert_eq!(parse_expr("null"), Expression::NullLiteral);
}

// --- Names ---

#[test]
fn column_names() {
    assert_eq!(parse_expr("column"), Expression::column("column"));
    assert_eq!(
        parse_expr("table.column"),
        Expression::qualified_column("table", "column")
    );
    assert_eq!(
        parse_expr("schema.table.column"),
        Expression::ColumnName {
            schema: Some(String::from("schema")),
            table: Some(String::from("table")),
            column: String::from("column"),
        }
    );
}

#[test]
fn quoted_column_names() {
    assert_eq!(parse_expr("\"select\""), Expression::column("select"));
    assert_eq!(parse_expr("[my column]"), Expression::column("my column"));
    assert_eq!(parse_expr("`t`.`c`"), Expression::qualified_column("t", "c"));
}

#[test]
fn non_reserved_keywords_as_column_names() {
    assert_eq!(parse_expr("first"), Expression::column("first"));
    assert_eq!(parse_expr("Last"), Expression::column("Last"));
}

// --- Unary ---

#[test]
fn unary_operators() {
    for (sql, op) in [
        ("-a", UnaryOperator::Minus),
        ("+a", UnaryOperator::Plus),
        ("~a", UnaryOperator::BitNot),
        ("NOT a", UnaryOperator::Not),
    ] {
        assert_eq!(
            parse_expr(sql),
            Expression::unary(op, Expression::column("a")),
            "{sql}"
        );
    }
}

#[test]
fn unary_binds_tighter_than_binary() {
    assert_eq!(
        parse_expr("-a * b"),
        Expression::unary(UnaryOperator::Minus, Expression::column("a"))
            .binary(BinaryOperator::Mul, Expression::column("b"))
    );
    assert_eq!(
        parse_expr("NOT a = b"),
        Expression::unary(UnaryOperator::Not, Expression::column("a"))
            .binary(BinaryOperator::Eq, Expression::column("b"))
    );
}

#[test]
fn nested_unary() {
    assert_eq!(
        parse_expr("- - 1"),
        Expression::unary(
            UnaryOperator::Minus,
            Expression::unary(UnaryOperator::Minus, Expression::numeric(1.0))
        )
    );
}

// --- Chained ---

#[test]
fn parenthesized_expressions() {
    assert_eq!(
        parse_expr("(a)"),
        Expression::Chained(vec![Expression::column("a")])
    );
    assert_eq!(
        parse_expr("(a, 'b', 3)"),
        Expression::Chained(vec![
            Expression::column("a"),
            Expression::string("b"),
            Expression::numeric(3.0),
        ])
    );
}

#[test]
fn parentheses_override_precedence() {
    let sum = Expression::column("a").binary(BinaryOperator::Add, Expression::column("b"));
    assert_eq!(
        parse_expr("(a + b) * c"),
        Expression::Chained(vec![sum]).binary(BinaryOperator::Mul, Expression::column("c"))
    );
}

// --- CAST ---

#[test]
fn cast_expression() {
    let Expression::Cast {
        expression,
        type_name,
    } = parse_expr("CAST(a AS varchar(10))")
    else {
        panic!("Expected CAST");
    };
    assert_eq!(*expression, Expression::column("a"));
    assert_eq!(type_name.name(), "varchar");
    assert_eq!(type_name.signed_numbers(), &[10.0]);
}

#[test]
fn cast_requires_type() {
    let mut parser = Parser::new("CAST(a AS )");
    assert!(parser.parse_expression().is_error());
    assert_eq!(parser.errors()[0].expected.as_deref(), Some("type name"));
}

// --- CASE ---

#[test]
fn case_without_operand() {
    let Expression::Case(case) = parse_expr("CASE WHEN a THEN 1 WHEN b THEN 2 ELSE 3 END") else {
        panic!("Expected CASE");
    };
    assert!(case.case_expression().is_none());
    assert_eq!(case.when_then_clauses().len(), 2);
    assert_eq!(case.when_then_clauses()[1].when(), &Expression::column("b"));
    assert_eq!(case.when_then_clauses()[1].then(), &Expression::numeric(2.0));
    assert_eq!(case.else_expression(), Some(&Expression::numeric(3.0)));
}

#[test]
fn case_with_operand() {
    let Expression::Case(case) = parse_expr("CASE status WHEN 1 THEN 'on' END") else {
        panic!("Expected CASE");
    };
    assert_eq!(case.case_expression(), Some(&Expression::column("status")));
    assert_eq!(case.when_then_clauses().len(), 1);
    assert!(case.else_expression().is_none());
}

#[test]
fn case_requires_when() {
    for sql in ["CASE END", "CASE a ELSE 1 END", "CASE WHEN a THEN 1", "CASE WHEN a END"] {
        let mut parser = Parser::new(sql);
        assert!(parser.parse_expression().is_error(), "{sql}");
        assert_eq!(parser.errors().len(), 1, "{sql}");
    }
}

// --- COLLATE ---

#[test]
fn collate_expression() {
    assert_eq!(
        parse_expr("name COLLATE nocase"),
        Expression::Collate {
            expression: Box::new(Expression::column("name")),
            collation_name: String::from("nocase"),
        }
    );
}

#[test]
fn collate_binds_tighter_than_unary() {
    assert_eq!(
        parse_expr("-a COLLATE c"),
        Expression::unary(
            UnaryOperator::Minus,
            Expression::Collate {
                expression: Box::new(Expression::column("a")),
                collation_name: String::from("c"),
            }
        )
    );
}

// --- Errors ---

#[test]
fn expression_errors() {
    for sql in ["", ")", "a +", "(a", "(a,)", "table.", "CAST(a)", "NOT", "a COLLATE"] {
        let mut parser = Parser::new(sql);
        assert!(parser.parse_expression().is_error(), "{sql}");
        assert!(parser.has_errors(), "{sql}");
    }
}

#[test]
fn reserved_keyword_is_not_a_column() {
    let mut parser = Parser::new("from");
    assert!(parser.parse_expression().is_error());
    assert_eq!(parser.errors()[0].expected.as_deref(), Some("expression"));
}
