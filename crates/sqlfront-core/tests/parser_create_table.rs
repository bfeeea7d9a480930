//! Tests for CREATE TABLE parsing.

mod common;
use common::*;

use sqlfront_core::ast::TypeName;

fn single_column_type(sql: &str) -> TypeName {
    let create = parse_create_table(sql);
    assert_eq!(create.columns().len(), 1);
    create.columns()[0].type_name().clone()
}

#[test]
fn create_table_minimal() {
    let create = parse_create_table("CREATE TABLE test ( column1 );");
    assert_eq!(create.schema(), None);
    assert_eq!(create.table(), "test");
    assert!(!create.is_temporary());
    assert!(create.is_error_if_table_exists());
    assert_eq!(create.columns().len(), 1);
    assert_eq!(create.columns()[0].name(), "column1");
    assert_eq!(create.columns()[0].type_name().name(), "BLOB");
    assert!(create.columns()[0].type_name().signed_numbers().is_empty());
}

#[test]
fn create_table_with_schema() {
    let create = parse_create_table("CREATE TABLE schema.test ( column1 );");
    assert_eq!(create.schema(), Some("schema"));
    assert_eq!(create.table(), "test");
}

#[test]
fn create_temp_table() {
    assert!(parse_create_table("CREATE TEMP TABLE test ( column1 );").is_temporary());
    assert!(parse_create_table("CREATE TEMPORARY TABLE test ( column1 );").is_temporary());
    assert!(parse_create_table("create temp table test ( column1 );").is_temporary());
}

#[test]
fn create_table_if_not_exists() {
    let create = parse_create_table("CREATE TABLE IF NOT EXISTS test ( column1 );");
    assert!(!create.is_error_if_table_exists());
    assert!(!create.is_temporary());
    assert_eq!(create.table(), "test");
}

#[test]
fn create_table_multiple_columns() {
    let create = parse_create_table("CREATE TABLE t (id int, name varchar(255), data);");
    let names: Vec<_> = create.columns().iter().map(|c| c.name()).collect();
    let types: Vec<_> = create.columns().iter().map(|c| c.type_name().name()).collect();
    assert_eq!(names, ["id", "name", "data"]);
    assert_eq!(types, ["int", "varchar", "BLOB"]);
}

#[test]
fn create_table_type_names_keep_spelling() {
    assert_eq!(single_column_type("CREATE TABLE test ( column1 int );").name(), "int");
    assert_eq!(
        single_column_type("CREATE TABLE test ( column1 varchar );").name(),
        "varchar"
    );
    assert_eq!(
        single_column_type("CREATE TABLE test ( column1 VarChar );").name(),
        "VarChar"
    );
}

#[test]
fn create_table_multi_word_type() {
    let type_name = single_column_type("CREATE TABLE test ( column1 unsigned big int );");
    assert_eq!(type_name.name(), "unsigned big int");
}

#[test]
#[allow(clippy::approx_constant)]
fn create_table_type_parameters() {
    let cases: [(&str, &[f64]); 6] = [
        ("varchar(255)", &[255.0]),
        ("varchar(255, 123)", &[255.0, 123.0]),
        ("varchar(255, -123)", &[255.0, -123.0]),
        ("varchar(0xff)", &[255.0]),
        ("varchar(3.14)", &[3.14]),
        ("varchar(1e3)", &[1000.0]),
    ];
    for (declared, expected) in cases {
        let sql = format!("CREATE TABLE test ( column1 {declared} );");
        let type_name = single_column_type(&sql);
        assert_eq!(type_name.name(), "varchar", "{sql}");
        assert_eq!(type_name.signed_numbers(), expected, "{sql}");
    }
}

#[test]
fn create_table_explicit_plus_sign() {
    let type_name = single_column_type("CREATE TABLE test ( column1 decimal(+10, 2) );");
    assert_eq!(type_name.signed_numbers(), &[10.0, 2.0]);
}

#[test]
fn create_table_keyword_names() {
    let create = parse_create_table("CREATE TABLE table ( first, last );");
    assert_eq!(create.table(), "table");
    assert_eq!(create.columns()[0].name(), "first");
    assert_eq!(create.columns()[1].name(), "last");
}

#[test]
fn create_table_errors() {
    for sql in [
        "",
        "CREATE",
        "CREATE TABLE",
        "CREATE TABLE test",
        "CREATE TABLE test ()",
        "CREATE TABLE test ();",
        "CREATE TABLE test ( column1 ",
        "CREATE TABLE test ( column1 )",
        "CREATE TABLE IF test ( column1 );",
        "CREATE TABLE IF NOT test ( column1 );",
        "CREATE TABLE test ( column1 varchar()",
        "CREATE TABLE test ( column1 varchar(abc)",
        "CREATE TABLE test ( column1 varchar(123 )",
        "CREATE TABLE test ( column1 varchar(123,  )",
        "CREATE TABLE test ( column1 varchar(123, ) )",
        "CREATE TABLE test ( column1 varchar(.) )",
        "CREATE TABLE test ( column1 varchar(.abc) )",
        "CREATE TABLE test ( column1 varchar(0x) )",
        "CREATE TABLE test ( column1 varchar(0xzzz) )",
        "CREATE TABLE test ( column1 decimal(1, 2, 3) );",
        "WITH table AS () CREATE TABLE test ( column1 );",
    ] {
        let _ = parse_err(sql);
    }
}

#[test]
fn create_table_three_parameters_reports_closing_paren() {
    let error = parse_err("CREATE TABLE test ( column1 decimal(1, 2, 3) );");
    assert_eq!(error.expected.as_deref(), Some("')'"));
}

#[test]
fn create_table_malformed_hex_reports_lexer_message() {
    let error = parse_err("CREATE TABLE test ( column1 varchar(0xzzz) );");
    assert_eq!(error.message, "Invalid hexadecimal literal");
}

#[test]
fn create_table_with_cte_is_unsupported() {
    let error = parse_err("WITH table AS () CREATE TABLE test ( column1 );");
    assert!(error.message.contains("WITH clause is not supported"), "{error}");
}
