//! SQL statement AST types.

use super::{ColumnDefinition, Expression};

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Order {
    /// Ascending order (default).
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

impl Order {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// The null placement used when no `NULLS FIRST|LAST` is given: NULLs sort
    /// as the smallest value.
    #[must_use]
    pub const fn default_nulls(&self) -> Nulls {
        match self {
            Self::Ascending => Nulls::First,
            Self::Descending => Nulls::Last,
        }
    }
}

/// Null placement for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Nulls {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl Nulls {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderingTerm {
    expression: Expression,
    collation: Option<String>,
    order: Order,
    nulls: Nulls,
}

impl OrderingTerm {
    /// Creates an ordering term, resolving an omitted null placement from
    /// the direction.
    #[must_use]
    pub fn new(
        expression: Expression,
        collation: Option<String>,
        order: Order,
        nulls: Option<Nulls>,
    ) -> Self {
        Self {
            expression,
            collation,
            order,
            nulls: nulls.unwrap_or_else(|| order.default_nulls()),
        }
    }

    /// The expression to order by.
    #[must_use]
    pub const fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Collation from a trailing `COLLATE name`.
    #[must_use]
    pub fn collation(&self) -> Option<&str> {
        self.collation.as_deref()
    }

    /// The direction (ASC or DESC).
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Null placement, always resolved.
    #[must_use]
    pub const fn nulls(&self) -> Nulls {
        self.nulls
    }
}

/// `LIMIT expr [OFFSET expr]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LimitClause {
    limit: Expression,
    offset: Option<Expression>,
}

impl LimitClause {
    #[must_use]
    pub const fn new(limit: Expression, offset: Option<Expression>) -> Self {
        Self { limit, offset }
    }

    #[must_use]
    pub const fn limit(&self) -> &Expression {
        &self.limit
    }

    #[must_use]
    pub const fn offset(&self) -> Option<&Expression> {
        self.offset.as_ref()
    }
}

/// `GROUP BY expr, ... [HAVING expr]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupByClause {
    group_by: Vec<Expression>,
    having: Option<Expression>,
}

impl GroupByClause {
    /// Creates a GROUP BY clause.
    ///
    /// # Panics
    ///
    /// Panics if `group_by` is empty.
    #[must_use]
    pub fn new(group_by: Vec<Expression>, having: Option<Expression>) -> Self {
        assert!(
            !group_by.is_empty(),
            "a GROUP BY clause needs at least one expression"
        );
        Self { group_by, having }
    }

    /// The grouping expressions, never empty.
    #[must_use]
    pub fn group_by(&self) -> &[Expression] {
        &self.group_by
    }

    /// The HAVING condition.
    #[must_use]
    pub const fn having(&self) -> Option<&Expression> {
        self.having.as_ref()
    }
}

/// One `name [(column, ...)] AS ( )` entry of a WITH clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommonTableExpression {
    table_name: String,
    column_names: Vec<String>,
}

impl CommonTableExpression {
    #[must_use]
    pub fn new(table_name: impl Into<String>, column_names: Vec<String>) -> Self {
        Self {
            table_name: table_name.into(),
            column_names,
        }
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The explicit column list; empty when none was given.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }
}

/// `WITH [RECURSIVE] cte, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommonTableExpressionList {
    recursive: bool,
    expressions: Vec<CommonTableExpression>,
}

impl CommonTableExpressionList {
    /// Creates a WITH clause.
    ///
    /// # Panics
    ///
    /// Panics if `expressions` is empty.
    #[must_use]
    pub fn new(recursive: bool, expressions: Vec<CommonTableExpression>) -> Self {
        assert!(
            !expressions.is_empty(),
            "a WITH clause needs at least one common table expression"
        );
        Self {
            recursive,
            expressions,
        }
    }

    /// Whether `RECURSIVE` was given.
    #[must_use]
    pub const fn recursive(&self) -> bool {
        self.recursive
    }

    /// The common table expressions, never empty.
    #[must_use]
    pub fn expressions(&self) -> &[CommonTableExpression] {
        &self.expressions
    }
}

/// `[schema.]table [AS alias]` as the target of DELETE.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QualifiedTableName {
    schema: Option<String>,
    table: String,
    alias: Option<String>,
}

impl QualifiedTableName {
    #[must_use]
    pub fn new(schema: Option<String>, table: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            schema,
            table: table.into(),
            alias,
        }
    }

    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

/// One `expr [[AS] alias]` entry of a RETURNING clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReturningColumn {
    expression: Expression,
    alias: Option<String>,
}

impl ReturningColumn {
    #[must_use]
    pub const fn new(expression: Expression, alias: Option<String>) -> Self {
        Self { expression, alias }
    }

    #[must_use]
    pub const fn expression(&self) -> &Expression {
        &self.expression
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

/// `RETURNING * | expr [[AS] alias], ...`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReturningClause {
    columns: Vec<ReturningColumn>,
}

impl ReturningClause {
    /// Creates a clause returning the given columns; an empty list means
    /// `RETURNING *`.
    #[must_use]
    pub const fn new(columns: Vec<ReturningColumn>) -> Self {
        Self { columns }
    }

    /// `RETURNING *`.
    #[must_use]
    pub const fn all() -> Self {
        Self::new(vec![])
    }

    /// The returned columns; empty for `RETURNING *`.
    #[must_use]
    pub fn columns(&self) -> &[ReturningColumn] {
        &self.columns
    }

    /// Returns true for `RETURNING *`.
    #[must_use]
    pub fn return_all_columns(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A column in a SELECT list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ResultColumn {
    /// `*`
    All,
    /// `table.*`
    Table(String),
    /// `expr [[AS] alias]`
    Expression {
        expression: Expression,
        alias: Option<String>,
    },
}

/// An entry of a FROM clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableOrSubquery {
    /// `[schema.]table [[AS] alias]`
    Table {
        schema: Option<String>,
        table: String,
        alias: Option<String>,
    },
    /// `(table-or-subquery, ...)`, never empty.
    Subqueries(Vec<TableOrSubquery>),
}

impl TableOrSubquery {
    /// Creates an unqualified table reference without alias.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            schema: None,
            table: name.into(),
            alias: None,
        }
    }
}

/// `CREATE [TEMP] TABLE`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateTableStatement {
    schema: Option<String>,
    table: String,
    columns: Vec<ColumnDefinition>,
    is_temporary: bool,
    is_error_if_table_exists: bool,
}

impl CreateTableStatement {
    /// Creates a CREATE TABLE statement.
    ///
    /// # Panics
    ///
    /// Panics if `columns` is empty.
    #[must_use]
    pub fn new(
        schema: Option<String>,
        table: impl Into<String>,
        columns: Vec<ColumnDefinition>,
        is_temporary: bool,
        is_error_if_table_exists: bool,
    ) -> Self {
        assert!(
            !columns.is_empty(),
            "a CREATE TABLE statement needs at least one column"
        );
        Self {
            schema,
            table: table.into(),
            columns,
            is_temporary,
            is_error_if_table_exists,
        }
    }

    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The column definitions, never empty.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    #[must_use]
    pub const fn is_temporary(&self) -> bool {
        self.is_temporary
    }

    /// False when `IF NOT EXISTS` was given.
    #[must_use]
    pub const fn is_error_if_table_exists(&self) -> bool {
        self.is_error_if_table_exists
    }
}

/// `DROP TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropTableStatement {
    schema: Option<String>,
    table: String,
    is_error_if_table_does_not_exist: bool,
}

impl DropTableStatement {
    #[must_use]
    pub fn new(
        schema: Option<String>,
        table: impl Into<String>,
        is_error_if_table_does_not_exist: bool,
    ) -> Self {
        Self {
            schema,
            table: table.into(),
            is_error_if_table_does_not_exist,
        }
    }

    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// False when `IF EXISTS` was given.
    #[must_use]
    pub const fn is_error_if_table_does_not_exist(&self) -> bool {
        self.is_error_if_table_does_not_exist
    }
}

/// `[WITH ...] DELETE FROM`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeleteStatement {
    common_table_expression_list: Option<CommonTableExpressionList>,
    qualified_table_name: QualifiedTableName,
    where_clause: Option<Expression>,
    returning_clause: Option<ReturningClause>,
}

impl DeleteStatement {
    #[must_use]
    pub const fn new(
        common_table_expression_list: Option<CommonTableExpressionList>,
        qualified_table_name: QualifiedTableName,
        where_clause: Option<Expression>,
        returning_clause: Option<ReturningClause>,
    ) -> Self {
        Self {
            common_table_expression_list,
            qualified_table_name,
            where_clause,
            returning_clause,
        }
    }

    #[must_use]
    pub const fn common_table_expression_list(&self) -> Option<&CommonTableExpressionList> {
        self.common_table_expression_list.as_ref()
    }

    #[must_use]
    pub const fn qualified_table_name(&self) -> &QualifiedTableName {
        &self.qualified_table_name
    }

    #[must_use]
    pub const fn where_clause(&self) -> Option<&Expression> {
        self.where_clause.as_ref()
    }

    #[must_use]
    pub const fn returning_clause(&self) -> Option<&ReturningClause> {
        self.returning_clause.as_ref()
    }
}

/// `SELECT`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectStatement {
    select_all: bool,
    result_columns: Vec<ResultColumn>,
    table_or_subquery_list: Vec<TableOrSubquery>,
    where_clause: Option<Expression>,
    group_by_clause: Option<GroupByClause>,
    ordering_term_list: Vec<OrderingTerm>,
    limit_clause: Option<LimitClause>,
}

impl SelectStatement {
    /// Creates a SELECT statement.
    ///
    /// # Panics
    ///
    /// Panics if `result_columns` or `table_or_subquery_list` is empty.
    #[must_use]
    pub fn new(
        select_all: bool,
        result_columns: Vec<ResultColumn>,
        table_or_subquery_list: Vec<TableOrSubquery>,
        where_clause: Option<Expression>,
        group_by_clause: Option<GroupByClause>,
        ordering_term_list: Vec<OrderingTerm>,
        limit_clause: Option<LimitClause>,
    ) -> Self {
        assert!(
            !result_columns.is_empty(),
            "a SELECT statement needs at least one result column"
        );
        assert!(
            !table_or_subquery_list.is_empty(),
            "a SELECT statement needs at least one table"
        );
        Self {
            select_all,
            result_columns,
            table_or_subquery_list,
            where_clause,
            group_by_clause,
            ordering_term_list,
            limit_clause,
        }
    }

    /// False for `SELECT DISTINCT`.
    #[must_use]
    pub const fn select_all(&self) -> bool {
        self.select_all
    }

    #[must_use]
    pub fn result_columns(&self) -> &[ResultColumn] {
        &self.result_columns
    }

    #[must_use]
    pub fn table_or_subquery_list(&self) -> &[TableOrSubquery] {
        &self.table_or_subquery_list
    }

    #[must_use]
    pub const fn where_clause(&self) -> Option<&Expression> {
        self.where_clause.as_ref()
    }

    #[must_use]
    pub const fn group_by_clause(&self) -> Option<&GroupByClause> {
        self.group_by_clause.as_ref()
    }

    /// The ORDER BY terms; empty without ORDER BY.
    #[must_use]
    pub fn ordering_term_list(&self) -> &[OrderingTerm] {
        &self.ordering_term_list
    }

    #[must_use]
    pub const fn limit_clause(&self) -> Option<&LimitClause> {
        self.limit_clause.as_ref()
    }
}

/// A parsed SQL statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    CreateTable(CreateTableStatement),
    DropTable(DropTableStatement),
    Delete(DeleteStatement),
    Select(SelectStatement),
    /// A statement that failed to parse; the diagnostic is kept by the parser.
    Error,
}

impl Statement {
    /// Returns true for the parse-failure placeholder.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_nulls_follow_order() {
        assert_eq!(Order::default(), Order::Ascending);
        assert_eq!(Order::Ascending.default_nulls(), Nulls::First);
        assert_eq!(Order::Descending.default_nulls(), Nulls::Last);
    }

    #[test]
    fn test_ordering_term_resolves_nulls() {
        let term = OrderingTerm::new(Expression::column("a"), None, Order::Descending, None);
        assert_eq!(term.nulls(), Nulls::Last);

        let term = OrderingTerm::new(
            Expression::column("a"),
            None,
            Order::Descending,
            Some(Nulls::First),
        );
        assert_eq!(term.nulls(), Nulls::First);
    }

    #[test]
    fn test_returning_all() {
        assert!(ReturningClause::all().return_all_columns());
        let clause =
            ReturningClause::new(vec![ReturningColumn::new(Expression::column("id"), None)]);
        assert!(!clause.return_all_columns());
        assert_eq!(clause.columns()[0].expression(), &Expression::column("id"));
    }

    #[test]
    fn test_group_by_accessors() {
        let clause = GroupByClause::new(
            vec![Expression::column("a")],
            Some(Expression::column("b")),
        );
        assert_eq!(clause.group_by().len(), 1);
        assert_eq!(clause.having(), Some(&Expression::column("b")));
    }

    #[test]
    #[should_panic(expected = "at least one expression")]
    fn test_group_by_rejects_empty_list() {
        let _ = GroupByClause::new(vec![], None);
    }

    #[test]
    #[should_panic(expected = "at least one common table expression")]
    fn test_cte_list_rejects_empty_list() {
        let _ = CommonTableExpressionList::new(false, vec![]);
    }

    #[test]
    #[should_panic(expected = "at least one column")]
    fn test_create_table_rejects_empty_column_list() {
        let _ = CreateTableStatement::new(None, "t", vec![], false, true);
    }

    #[test]
    fn test_statement_is_error() {
        assert!(Statement::Error.is_error());
        let drop = Statement::DropTable(DropTableStatement::new(None, "t", true));
        assert!(!drop.is_error());
    }
}
