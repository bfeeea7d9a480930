//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node owns its children. [`Statement`] and [`Expression`] are closed
//! enums; a statement or expression that failed to parse is represented by
//! their `Error` variants. All nodes render back to SQL through
//! [`core::fmt::Display`].

mod display;
mod expression;
mod statement;
mod types;

pub use expression::{
    BinaryOperator, CaseExpression, Expression, MatchOperator, UnaryOperator, WhenThenClause,
};
pub use statement::{
    CommonTableExpression, CommonTableExpressionList, CreateTableStatement, DeleteStatement,
    DropTableStatement, GroupByClause, LimitClause, Nulls, Order, OrderingTerm,
    QualifiedTableName, ResultColumn, ReturningClause, ReturningColumn, SelectStatement,
    Statement, TableOrSubquery,
};
pub use types::{ColumnDefinition, TypeName};
