//! SQL rendering via `fmt::Display` for AST nodes.
//!
//! The output is canonical SQL: uppercase keywords, identifiers quoted only
//! when they would not lex back as the same name, and parentheses only where
//! the tree would otherwise re-parse differently. For any tree produced by the
//! parser, parsing the rendered text yields an equal tree.

use core::fmt;

use super::{
    BinaryOperator, CaseExpression, ColumnDefinition, CommonTableExpression,
    CommonTableExpressionList, CreateTableStatement, DeleteStatement, DropTableStatement,
    Expression, GroupByClause, LimitClause, OrderingTerm, QualifiedTableName, ResultColumn,
    ReturningClause, ReturningColumn, SelectStatement, Statement, TableOrSubquery, TypeName,
    UnaryOperator,
};
use crate::lexer::Keyword;

fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Returns true if `name` would not lex back as a plain identifier.
fn needs_quoting(name: &str) -> bool {
    let mut bytes = name.bytes();
    let Some(first) = bytes.next() else {
        return true;
    };
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return true;
    }
    bytes.any(|b| !(b.is_ascii_alphanumeric() || b == b'_' || b == b'$'))
        || Keyword::from_str(name).is_some()
}

fn write_ident(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if needs_quoting(name) {
        write!(f, "\"{}\"", name.replace('"', "\"\""))
    } else {
        f.write_str(name)
    }
}

fn write_qualified(f: &mut fmt::Formatter<'_>, schema: Option<&str>, name: &str) -> fmt::Result {
    if let Some(schema) = schema {
        write_ident(f, schema)?;
        f.write_str(".")?;
    }
    write_ident(f, name)
}

fn write_alias(f: &mut fmt::Formatter<'_>, alias: Option<&str>) -> fmt::Result {
    if let Some(alias) = alias {
        f.write_str(" AS ")?;
        write_ident(f, alias)?;
    }
    Ok(())
}

/// Writes `expr`, parenthesized when it binds looser than `min_precedence`.
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    expr: &Expression,
    min_precedence: u8,
) -> fmt::Result {
    match expr.precedence() {
        Some(precedence) if precedence < min_precedence => write!(f, "({expr})"),
        _ => write!(f, "{expr}"),
    }
}

fn write_not(f: &mut fmt::Formatter<'_>, invert: bool) -> fmt::Result {
    if invert {
        f.write_str(" NOT")?;
    }
    Ok(())
}

/// Operand strength needed on the right of a predicate (`BETWEEN` bounds,
/// `LIKE` patterns, `IS` right-hand sides).
const PREDICATE_RHS: u8 = BinaryOperator::EQUALITY_PRECEDENCE + 1;

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Multi-word names are stored joined by single spaces.
        for (i, word) in self.name().split(' ').enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write_ident(f, word)?;
        }
        if !self.signed_numbers().is_empty() {
            f.write_str("(")?;
            for (i, number) in self.signed_numbers().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{number}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ident(f, self.name())?;
        write!(f, " {}", self.type_name())
    }
}

impl fmt::Display for CaseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(operand) = self.case_expression() {
            write!(f, " {operand}")?;
        }
        for clause in self.when_then_clauses() {
            write!(f, " WHEN {} THEN {}", clause.when(), clause.then())?;
        }
        if let Some(otherwise) = self.else_expression() {
            write!(f, " ELSE {otherwise}")?;
        }
        f.write_str(" END")
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("<error>"),
            Self::NumericLiteral(value) if value.is_infinite() => f.write_str("1e999"),
            Self::NumericLiteral(value) if *value < 0.0 && value.fract() == 0.0 => {
                // Only hex literals lex to negative values: write the same
                // 64-bit pattern back.
                #[allow(clippy::cast_possible_truncation)]
                let bits = *value as i64;
                write!(f, "0x{bits:X}")
            }
            Self::NumericLiteral(value) => write!(f, "{value}"),
            Self::StringLiteral(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Self::BlobLiteral(bytes) => {
                f.write_str("X'")?;
                for byte in bytes {
                    write!(f, "{byte:02X}")?;
                }
                f.write_str("'")
            }
            Self::NullLiteral => f.write_str("NULL"),
            Self::ColumnName {
                schema,
                table,
                column,
            } => {
                if let Some(table) = table {
                    write_qualified(f, schema.as_deref(), table)?;
                    f.write_str(".")?;
                }
                write_ident(f, column)
            }
            Self::Unary { op, expression } => {
                f.write_str(op.as_str())?;
                // `- -x` must not collapse into a `--` comment.
                if matches!(op, UnaryOperator::Not)
                    || matches!(
                        **expression,
                        Self::Unary {
                            op: UnaryOperator::Minus | UnaryOperator::Plus,
                            ..
                        }
                    )
                {
                    f.write_str(" ")?;
                }
                write_operand(f, expression, UnaryOperator::PRECEDENCE)
            }
            Self::Binary { op, lhs, rhs } => {
                let precedence = op.precedence();
                let (lhs_min, rhs_min) = if op.is_right_associative() {
                    (precedence + 1, precedence)
                } else {
                    (precedence, precedence + 1)
                };
                write_operand(f, lhs, lhs_min)?;
                write!(f, " {} ", op.as_str())?;
                write_operand(f, rhs, rhs_min)
            }
            Self::Chained(expressions) => {
                f.write_str("(")?;
                comma_list(f, expressions)?;
                f.write_str(")")
            }
            Self::Cast {
                expression,
                type_name,
            } => write!(f, "CAST({expression} AS {type_name})"),
            Self::Case(case) => write!(f, "{case}"),
            Self::Collate {
                expression,
                collation_name,
            } => {
                match **expression {
                    // These end in a keyword, `)` or a name, so COLLATE after
                    // them applies to the whole predicate.
                    Self::Null { .. } | Self::InChained { .. } | Self::InTable { .. } => {
                        write!(f, "{expression}")?;
                    }
                    _ => write_operand(f, expression, UnaryOperator::PRECEDENCE + 1)?,
                }
                f.write_str(" COLLATE ")?;
                write_ident(f, collation_name)
            }
            Self::Match {
                op,
                lhs,
                rhs,
                escape,
                invert,
            } => {
                write_operand(f, lhs, BinaryOperator::EQUALITY_PRECEDENCE)?;
                write_not(f, *invert)?;
                write!(f, " {} ", op.as_str())?;
                write_operand(f, rhs, PREDICATE_RHS)?;
                if let Some(escape) = escape {
                    f.write_str(" ESCAPE ")?;
                    write_operand(f, escape, PREDICATE_RHS)?;
                }
                Ok(())
            }
            Self::Null { expression, invert } => {
                write_operand(f, expression, BinaryOperator::EQUALITY_PRECEDENCE)?;
                f.write_str(" IS")?;
                write_not(f, *invert)?;
                f.write_str(" NULL")
            }
            Self::Is { lhs, rhs, invert } => {
                write_operand(f, lhs, BinaryOperator::EQUALITY_PRECEDENCE)?;
                f.write_str(" IS")?;
                write_not(f, *invert)?;
                f.write_str(" ")?;
                write_operand(f, rhs, PREDICATE_RHS)
            }
            Self::Between {
                expression,
                lhs,
                rhs,
                invert,
            } => {
                write_operand(f, expression, BinaryOperator::EQUALITY_PRECEDENCE)?;
                write_not(f, *invert)?;
                f.write_str(" BETWEEN ")?;
                write_operand(f, lhs, PREDICATE_RHS)?;
                f.write_str(" AND ")?;
                write_operand(f, rhs, PREDICATE_RHS)
            }
            Self::InChained {
                expression,
                chain,
                invert,
            } => {
                write_operand(f, expression, BinaryOperator::EQUALITY_PRECEDENCE)?;
                write_not(f, *invert)?;
                f.write_str(" IN (")?;
                comma_list(f, chain)?;
                f.write_str(")")
            }
            Self::InTable {
                expression,
                schema,
                table,
                invert,
            } => {
                write_operand(f, expression, BinaryOperator::EQUALITY_PRECEDENCE)?;
                write_not(f, *invert)?;
                f.write_str(" IN ")?;
                write_qualified(f, schema.as_deref(), table)
            }
        }
    }
}

impl fmt::Display for CommonTableExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ident(f, self.table_name())?;
        if !self.column_names().is_empty() {
            f.write_str("(")?;
            for (i, column) in self.column_names().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_ident(f, column)?;
            }
            f.write_str(")")?;
        }
        f.write_str(" AS ()")
    }
}

impl fmt::Display for CommonTableExpressionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        if self.recursive() {
            f.write_str("RECURSIVE ")?;
        }
        comma_list(f, self.expressions())
    }
}

impl fmt::Display for QualifiedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_qualified(f, self.schema(), self.table())?;
        write_alias(f, self.alias())
    }
}

impl fmt::Display for ReturningColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression())?;
        write_alias(f, self.alias())
    }
}

impl fmt::Display for ReturningClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RETURNING ")?;
        if self.return_all_columns() {
            f.write_str("*")
        } else {
            comma_list(f, self.columns())
        }
    }
}

impl fmt::Display for ResultColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Table(table) => {
                write_ident(f, table)?;
                f.write_str(".*")
            }
            Self::Expression { expression, alias } => {
                write!(f, "{expression}")?;
                write_alias(f, alias.as_deref())
            }
        }
    }
}

impl fmt::Display for TableOrSubquery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table {
                schema,
                table,
                alias,
            } => {
                write_qualified(f, schema.as_deref(), table)?;
                write_alias(f, alias.as_deref())
            }
            Self::Subqueries(list) => {
                f.write_str("(")?;
                comma_list(f, list)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for GroupByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GROUP BY ")?;
        comma_list(f, self.group_by())?;
        if let Some(having) = self.having() {
            write!(f, " HAVING {having}")?;
        }
        Ok(())
    }
}

impl fmt::Display for OrderingTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression())?;
        if let Some(collation) = self.collation() {
            f.write_str(" COLLATE ")?;
            write_ident(f, collation)?;
        }
        write!(f, " {}", self.order().as_str())?;
        if self.nulls() != self.order().default_nulls() {
            write!(f, " {}", self.nulls().as_str())?;
        }
        Ok(())
    }
}

impl fmt::Display for LimitClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {}", self.limit())?;
        if let Some(offset) = self.offset() {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.is_temporary() {
            f.write_str("TEMP ")?;
        }
        f.write_str("TABLE ")?;
        if !self.is_error_if_table_exists() {
            f.write_str("IF NOT EXISTS ")?;
        }
        write_qualified(f, self.schema(), self.table())?;
        f.write_str(" (")?;
        comma_list(f, self.columns())?;
        f.write_str(")")
    }
}

impl fmt::Display for DropTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DROP TABLE ")?;
        if !self.is_error_if_table_does_not_exist() {
            f.write_str("IF EXISTS ")?;
        }
        write_qualified(f, self.schema(), self.table())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ctes) = self.common_table_expression_list() {
            write!(f, "{ctes} ")?;
        }
        write!(f, "DELETE FROM {}", self.qualified_table_name())?;
        if let Some(condition) = self.where_clause() {
            write!(f, " WHERE {condition}")?;
        }
        if let Some(returning) = self.returning_clause() {
            write!(f, " {returning}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if !self.select_all() {
            f.write_str("DISTINCT ")?;
        }
        comma_list(f, self.result_columns())?;
        f.write_str(" FROM ")?;
        comma_list(f, self.table_or_subquery_list())?;
        if let Some(condition) = self.where_clause() {
            write!(f, " WHERE {condition}")?;
        }
        if let Some(group_by) = self.group_by_clause() {
            write!(f, " {group_by}")?;
        }
        if !self.ordering_term_list().is_empty() {
            f.write_str(" ORDER BY ")?;
            comma_list(f, self.ordering_term_list())?;
        }
        if let Some(limit) = self.limit_clause() {
            write!(f, " {limit}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateTable(statement) => write!(f, "{statement};"),
            Self::DropTable(statement) => write!(f, "{statement};"),
            Self::Delete(statement) => write!(f, "{statement};"),
            Self::Select(statement) => write!(f, "{statement};"),
            Self::Error => f.write_str("<error>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{MatchOperator, Nulls, Order};

    #[test]
    fn test_identifier_quoting() {
        assert_eq!(Expression::column("users").to_string(), "users");
        assert_eq!(Expression::column("table").to_string(), "\"table\"");
        assert_eq!(Expression::column("my col").to_string(), "\"my col\"");
        assert_eq!(Expression::column("1st").to_string(), "\"1st\"");
        assert_eq!(Expression::column("a\"b").to_string(), "\"a\"\"b\"");
        assert_eq!(Expression::qualified_column("t", "c").to_string(), "t.c");
    }

    #[test]
    fn test_literals() {
        assert_eq!(Expression::numeric(255.0).to_string(), "255");
        assert_eq!(Expression::numeric(3.25).to_string(), "3.25");
        assert_eq!(Expression::string("it's").to_string(), "'it''s'");
        assert_eq!(
            Expression::BlobLiteral(vec![0x01, 0xab]).to_string(),
            "X'01AB'"
        );
        assert_eq!(Expression::NullLiteral.to_string(), "NULL");
    }

    #[test]
    fn test_negative_literal_renders_as_hex_pattern() {
        assert_eq!(Expression::numeric(-1.0).to_string(), "0xFFFFFFFFFFFFFFFF");
        assert_eq!(
            Expression::numeric(-9_223_372_036_854_775_808.0).to_string(),
            "0x8000000000000000"
        );
    }

    #[test]
    fn test_type_name_words_are_quoted_when_needed() {
        let type_name = TypeName::new("unsigned big int", vec![]);
        assert_eq!(type_name.to_string(), "unsigned big int");
        let type_name = TypeName::new("select", vec![10.0]);
        assert_eq!(type_name.to_string(), "\"select\"(10)");
    }

    #[test]
    fn test_collate_after_postfix_predicate_is_not_parenthesized() {
        let null_check = Expression::Null {
            expression: Box::new(Expression::column("a")),
            invert: false,
        };
        let collate = Expression::Collate {
            expression: Box::new(null_check),
            collation_name: String::from("nocase"),
        };
        assert_eq!(collate.to_string(), "a IS NULL COLLATE nocase");

        let sum = Expression::column("a").binary(BinaryOperator::Add, Expression::column("b"));
        let collate = Expression::Collate {
            expression: Box::new(sum),
            collation_name: String::from("nocase"),
        };
        assert_eq!(collate.to_string(), "(a + b) COLLATE nocase");
    }

    #[test]
    fn test_binary_parenthesization() {
        let sum = Expression::column("a").binary(BinaryOperator::Add, Expression::column("b"));
        let product = sum
            .clone()
            .binary(BinaryOperator::Mul, Expression::column("c"));
        assert_eq!(product.to_string(), "(a + b) * c");

        let nested_right =
            Expression::column("a").binary(BinaryOperator::Sub, sum.clone());
        assert_eq!(nested_right.to_string(), "a - (a + b)");

        let nested_left = sum.binary(BinaryOperator::Sub, Expression::column("c"));
        assert_eq!(nested_left.to_string(), "a + b - c");
    }

    #[test]
    fn test_double_negation_keeps_space() {
        let negated = Expression::unary(
            UnaryOperator::Minus,
            Expression::unary(UnaryOperator::Minus, Expression::numeric(5.0)),
        );
        assert_eq!(negated.to_string(), "- -5");
        assert_eq!(
            Expression::unary(UnaryOperator::Not, Expression::column("a")).to_string(),
            "NOT a"
        );
    }

    #[test]
    fn test_predicates() {
        let like = Expression::Match {
            op: MatchOperator::Like,
            lhs: Box::new(Expression::column("name")),
            rhs: Box::new(Expression::string("a%")),
            escape: Some(Box::new(Expression::string("\\"))),
            invert: true,
        };
        assert_eq!(like.to_string(), "name NOT LIKE 'a%' ESCAPE '\\'");

        let in_table = Expression::InTable {
            expression: Box::new(Expression::column("id")),
            schema: Some(String::from("main")),
            table: String::from("ids"),
            invert: false,
        };
        assert_eq!(in_table.to_string(), "id IN main.ids");

        let null_check = Expression::Null {
            expression: Box::new(Expression::column("a")),
            invert: true,
        };
        assert_eq!(null_check.to_string(), "a IS NOT NULL");
    }

    #[test]
    fn test_ordering_term_omits_default_nulls() {
        let term = OrderingTerm::new(Expression::column("a"), None, Order::Descending, None);
        assert_eq!(term.to_string(), "a DESC");
        let term = OrderingTerm::new(
            Expression::column("a"),
            Some(String::from("nocase")),
            Order::Ascending,
            Some(Nulls::Last),
        );
        assert_eq!(term.to_string(), "a COLLATE nocase ASC NULLS LAST");
    }

    #[test]
    fn test_statements_end_with_semicolon() {
        let drop = Statement::DropTable(DropTableStatement::new(
            Some(String::from("main")),
            "table",
            false,
        ));
        assert_eq!(drop.to_string(), "DROP TABLE IF EXISTS main.\"table\";");
    }
}
