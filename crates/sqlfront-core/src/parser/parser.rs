//! SQL Parser implementation.

use tracing::{debug, trace};

use super::error::ParseError;
use super::pratt::{
    COLLATE_BP, EQUALITY_BP, PREDICATE_RHS_BP, PREFIX_BP, infix_binding_power,
    keyword_to_match_op, token_to_binary_op, token_to_unary_op,
};
use crate::ast::{
    CaseExpression, ColumnDefinition, CommonTableExpression, CommonTableExpressionList,
    CreateTableStatement, DeleteStatement, DropTableStatement, Expression, GroupByClause,
    LimitClause, Nulls, Order, OrderingTerm, QualifiedTableName, ResultColumn, ReturningClause,
    ReturningColumn, SelectStatement, Statement, TableOrSubquery, TypeName, WhenThenClause,
};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// Returns true if `token` can be used as a name: an identifier, or a
/// keyword that is not reserved.
const fn is_name(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Identifier(_) => true,
        TokenKind::Keyword(keyword) => !keyword.is_reserved(),
        _ => false,
    }
}

/// SQL Parser.
///
/// Works over a fully tokenized input, one statement per call to
/// [`Parser::next_statement`]. Syntax errors never abort parsing: each
/// malformed statement records one [`ParseError`], becomes
/// [`Statement::Error`], and parsing resumes after its `;`.
pub struct Parser<'a> {
    source: &'a str,
    /// Never empty; the last token is always `Eof`.
    tokens: Vec<Token>,
    pos: usize,
    /// Current expression and subquery nesting.
    depth: usize,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// How deeply expressions and parenthesized table lists may nest.
    pub const MAX_DEPTH: usize = 128;

    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let tokens = Lexer::new(source).tokenize();
        Self::from_tokens(source, tokens)
    }

    /// Creates a parser over an existing token stream.
    ///
    /// `source` is the text the token spans point into; it supplies the
    /// spelling of keywords used as names. An `Eof` token is appended when
    /// the stream does not end with one.
    #[must_use]
    pub fn from_tokens(source: &'a str, mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            tokens.push(Token::new(TokenKind::Eof, Span::at(source.len())));
        }
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }

    /// Parses the next statement, up to and including its `;`.
    ///
    /// Returns [`Statement::Error`] if the statement is malformed; the
    /// diagnostic is available through [`Parser::errors`].
    pub fn next_statement(&mut self) -> Statement {
        match self.parse_statement() {
            Ok(statement) => statement,
            Err(error) => {
                self.record(error);
                self.synchronize();
                Statement::Error
            }
        }
    }

    /// Parses a single expression.
    ///
    /// Returns [`Expression::Error`] if no expression could be parsed; the
    /// diagnostic is available through [`Parser::errors`].
    pub fn parse_expression(&mut self) -> Expression {
        match self.parse_expr_bp(0) {
            Ok(expression) => expression,
            Err(error) => {
                self.record(error);
                Expression::Error
            }
        }
    }

    /// Returns true once only the end of input remains.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    /// Returns true if any diagnostic has been recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The diagnostics recorded so far, in source order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Hands the recorded diagnostics to the caller and clears them.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        core::mem::take(&mut self.errors)
    }

    fn record(&mut self, error: ParseError) {
        debug!(%error, "recording parse error");
        self.errors.push(error);
    }

    /// Skips past the next `;`, or to the end of input.
    fn synchronize(&mut self) {
        let start = self.pos;
        while !self.is_at_end() {
            let is_separator = self.check(&TokenKind::Semicolon);
            self.advance();
            if is_separator {
                break;
            }
        }
        debug!(skipped = self.pos - start, "resynchronized after parse error");
    }

    // --- Statements ---

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        trace!(token = %self.current().kind, "parsing statement");

        let common_table_expressions = if self.check_keyword(Keyword::With) {
            Some(self.parse_common_table_expression_list()?)
        } else {
            None
        };

        let statement = match self.current().as_keyword() {
            Some(Keyword::Delete) => {
                Statement::Delete(self.parse_delete_statement(common_table_expressions)?)
            }
            Some(keyword @ (Keyword::Create | Keyword::Drop | Keyword::Select))
                if common_table_expressions.is_some() =>
            {
                return Err(ParseError::new(
                    format!("WITH clause is not supported before {keyword}"),
                    self.current().span,
                ));
            }
            Some(Keyword::Create) => Statement::CreateTable(self.parse_create_table_statement()?),
            Some(Keyword::Drop) => Statement::DropTable(self.parse_drop_table_statement()?),
            Some(Keyword::Select) => Statement::Select(self.parse_select_statement()?),
            _ => {
                return Err(self.unexpected("CREATE, DROP, DELETE, SELECT, or WITH"));
            }
        };

        self.expect(&TokenKind::Semicolon)?;
        Ok(statement)
    }

    /// Parses `CREATE [TEMP|TEMPORARY] TABLE [IF NOT EXISTS] [schema.]table (columns)`.
    fn parse_create_table_statement(&mut self) -> Result<CreateTableStatement, ParseError> {
        self.expect_keyword(Keyword::Create)?;

        let is_temporary =
            self.consume_keyword(Keyword::Temp) || self.consume_keyword(Keyword::Temporary);
        self.expect_keyword(Keyword::Table)?;

        let is_error_if_table_exists = if self.check_keyword(Keyword::If)
            && self.peek_nth(1).as_keyword() == Some(Keyword::Not)
        {
            self.advance();
            self.advance();
            self.expect_keyword(Keyword::Exists)?;
            false
        } else {
            true
        };

        let (schema, table) = self.parse_qualified_name("table name")?;

        self.expect(&TokenKind::LeftParen)?;
        let columns = self.parse_comma_separated(Self::parse_column_definition)?;
        self.expect(&TokenKind::RightParen)?;

        Ok(CreateTableStatement::new(
            schema,
            table,
            columns,
            is_temporary,
            is_error_if_table_exists,
        ))
    }

    fn parse_column_definition(&mut self) -> Result<ColumnDefinition, ParseError> {
        let name = self.expect_name("column name")?;
        let type_name = if is_name(self.current()) {
            self.parse_type_name()?
        } else {
            TypeName::blob()
        };
        Ok(ColumnDefinition::new(name, type_name))
    }

    /// Parses `name [name ...] [(signed-number [, signed-number])]`.
    fn parse_type_name(&mut self) -> Result<TypeName, ParseError> {
        let mut words = vec![self.expect_name("type name")?];
        while is_name(self.current()) {
            words.push(self.expect_name("type name")?);
        }

        let mut signed_numbers = Vec::new();
        if self.consume(&TokenKind::LeftParen) {
            signed_numbers.push(self.parse_signed_number()?);
            if self.consume(&TokenKind::Comma) {
                signed_numbers.push(self.parse_signed_number()?);
            }
            self.expect(&TokenKind::RightParen)?;
        }

        Ok(TypeName::new(words.join(" "), signed_numbers))
    }

    #[allow(clippy::cast_precision_loss)]
    fn parse_signed_number(&mut self) -> Result<f64, ParseError> {
        let negative = if self.consume(&TokenKind::Minus) {
            true
        } else {
            self.consume(&TokenKind::Plus);
            false
        };

        let value = match self.current().kind {
            TokenKind::Integer(value) => value as f64,
            TokenKind::Float(value) => value,
            _ => return Err(self.unexpected("number")),
        };
        self.advance();

        Ok(if negative { -value } else { value })
    }

    /// Parses `DROP TABLE [IF EXISTS] [schema.]table`.
    fn parse_drop_table_statement(&mut self) -> Result<DropTableStatement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Table)?;

        let is_error_if_table_does_not_exist = if self.check_keyword(Keyword::If)
            && self.peek_nth(1).as_keyword() == Some(Keyword::Exists)
        {
            self.advance();
            self.advance();
            false
        } else {
            true
        };

        let (schema, table) = self.parse_qualified_name("table name")?;

        Ok(DropTableStatement::new(
            schema,
            table,
            is_error_if_table_does_not_exist,
        ))
    }

    /// Parses `WITH [RECURSIVE] name [(columns)] AS ( ), ...`.
    fn parse_common_table_expression_list(
        &mut self,
    ) -> Result<CommonTableExpressionList, ParseError> {
        self.expect_keyword(Keyword::With)?;

        // `WITH recursive AS ()` names a table called "recursive".
        let recursive = self.check_keyword(Keyword::Recursive) && is_name(self.peek_nth(1));
        if recursive {
            self.advance();
        }

        let expressions = self.parse_comma_separated(Self::parse_common_table_expression)?;
        Ok(CommonTableExpressionList::new(recursive, expressions))
    }

    fn parse_common_table_expression(&mut self) -> Result<CommonTableExpression, ParseError> {
        let table_name = self.expect_name("table name")?;

        let column_names = if self.consume(&TokenKind::LeftParen) {
            let names = self.parse_comma_separated(|parser| parser.expect_name("column name"))?;
            self.expect(&TokenKind::RightParen)?;
            names
        } else {
            vec![]
        };

        self.expect_keyword(Keyword::As)?;
        self.expect(&TokenKind::LeftParen)?;
        self.expect(&TokenKind::RightParen)?;

        Ok(CommonTableExpression::new(table_name, column_names))
    }

    /// Parses `DELETE FROM [schema.]table [AS alias] [WHERE expr] [RETURNING ...]`.
    fn parse_delete_statement(
        &mut self,
        common_table_expression_list: Option<CommonTableExpressionList>,
    ) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;

        let (schema, table) = self.parse_qualified_name("table name")?;
        let alias = if self.consume_keyword(Keyword::As) {
            Some(self.expect_name("alias")?)
        } else {
            None
        };

        let where_clause = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expr_bp(0)?)
        } else {
            None
        };

        let returning_clause = if self.consume_keyword(Keyword::Returning) {
            Some(self.parse_returning_clause()?)
        } else {
            None
        };

        Ok(DeleteStatement::new(
            common_table_expression_list,
            QualifiedTableName::new(schema, table, alias),
            where_clause,
            returning_clause,
        ))
    }

    fn parse_returning_clause(&mut self) -> Result<ReturningClause, ParseError> {
        if self.consume(&TokenKind::Star) {
            return Ok(ReturningClause::all());
        }

        let columns = self.parse_comma_separated(|parser| {
            let expression = parser.parse_expr_bp(0)?;
            let alias = parser.parse_optional_alias()?;
            Ok(ReturningColumn::new(expression, alias))
        })?;
        Ok(ReturningClause::new(columns))
    }

    /// Parses a SELECT statement.
    fn parse_select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT or ALL
        let select_all = if self.consume_keyword(Keyword::Distinct) {
            false
        } else {
            self.consume_keyword(Keyword::All);
            true
        };

        let result_columns = self.parse_comma_separated(Self::parse_result_column)?;

        self.expect_keyword(Keyword::From)?;
        let table_or_subquery_list = self.parse_comma_separated(Self::parse_table_or_subquery)?;

        let where_clause = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expr_bp(0)?)
        } else {
            None
        };

        let group_by_clause = if self.consume_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            let group_by = self.parse_comma_separated(|parser| parser.parse_expr_bp(0))?;
            let having = if self.consume_keyword(Keyword::Having) {
                Some(self.parse_expr_bp(0)?)
            } else {
                None
            };
            Some(GroupByClause::new(group_by, having))
        } else {
            None
        };

        let ordering_term_list = if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_comma_separated(Self::parse_ordering_term)?
        } else {
            vec![]
        };

        let limit_clause = if self.consume_keyword(Keyword::Limit) {
            let limit = self.parse_expr_bp(0)?;
            let offset = if self.consume_keyword(Keyword::Offset) {
                Some(self.parse_expr_bp(0)?)
            } else {
                None
            };
            Some(LimitClause::new(limit, offset))
        } else {
            None
        };

        Ok(SelectStatement::new(
            select_all,
            result_columns,
            table_or_subquery_list,
            where_clause,
            group_by_clause,
            ordering_term_list,
            limit_clause,
        ))
    }

    fn parse_result_column(&mut self) -> Result<ResultColumn, ParseError> {
        if self.consume(&TokenKind::Star) {
            return Ok(ResultColumn::All);
        }

        // table.*
        if is_name(self.current())
            && matches!(self.peek_nth(1).kind, TokenKind::Dot)
            && matches!(self.peek_nth(2).kind, TokenKind::Star)
        {
            let table = self.expect_name("table name")?;
            self.advance();
            self.advance();
            return Ok(ResultColumn::Table(table));
        }

        let expression = self.parse_expr_bp(0)?;
        let alias = self.parse_optional_alias()?;
        Ok(ResultColumn::Expression { expression, alias })
    }

    fn parse_table_or_subquery(&mut self) -> Result<TableOrSubquery, ParseError> {
        if self.consume(&TokenKind::LeftParen) {
            let list = self.nested("Table list nested too deeply", |parser| {
                parser.parse_comma_separated(Self::parse_table_or_subquery)
            })?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(TableOrSubquery::Subqueries(list));
        }

        let (schema, table) = self.parse_qualified_name("table name")?;
        let alias = self.parse_optional_alias()?;
        Ok(TableOrSubquery::Table {
            schema,
            table,
            alias,
        })
    }

    /// Parses `expr [COLLATE name] [ASC|DESC] [NULLS FIRST|LAST]`.
    fn parse_ordering_term(&mut self) -> Result<OrderingTerm, ParseError> {
        let (expression, collation) = match self.parse_expr_bp(0)? {
            Expression::Collate {
                expression,
                collation_name,
            } => (*expression, Some(collation_name)),
            expression => (expression, None),
        };

        let order = if self.consume_keyword(Keyword::Desc) {
            Order::Descending
        } else {
            self.consume_keyword(Keyword::Asc);
            Order::Ascending
        };

        let nulls = if self.consume_keyword(Keyword::Nulls) {
            if self.consume_keyword(Keyword::First) {
                Some(Nulls::First)
            } else if self.consume_keyword(Keyword::Last) {
                Some(Nulls::Last)
            } else {
                return Err(self.unexpected("FIRST or LAST"));
            }
        } else {
            None
        };

        Ok(OrderingTerm::new(expression, collation, order, nulls))
    }

    /// Parses `AS name` or a bare identifier.
    fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.consume_keyword(Keyword::As) {
            return self.expect_name("alias").map(Some);
        }
        if let TokenKind::Identifier(name) = &self.current().kind {
            let name = name.clone();
            self.advance();
            return Ok(Some(name));
        }
        Ok(None)
    }

    /// Parses `[schema.]name`.
    fn parse_qualified_name(
        &mut self,
        what: &str,
    ) -> Result<(Option<String>, String), ParseError> {
        let first = self.expect_name(what)?;
        if self.consume(&TokenKind::Dot) {
            let second = self.expect_name(what)?;
            Ok((Some(first), second))
        } else {
            Ok((None, first))
        }
    }

    // --- Expressions ---

    /// Parses an expression using Pratt parsing.
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        self.nested("Expression nested too deeply", |parser| {
            parser.parse_operators(min_bp)
        })
    }

    fn parse_operators(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            if let Some(op) = token_to_binary_op(&self.current().kind) {
                let (l_bp, r_bp) = infix_binding_power(op);
                if l_bp < min_bp {
                    break;
                }
                self.advance();
                let rhs = self.parse_expr_bp(r_bp)?;
                lhs = lhs.binary(op, rhs);
                continue;
            }

            match self.current().as_keyword() {
                Some(Keyword::Collate) => {
                    if COLLATE_BP < min_bp {
                        break;
                    }
                    self.advance();
                    let collation_name = self.expect_name("collation name")?;
                    lhs = Expression::Collate {
                        expression: Box::new(lhs),
                        collation_name,
                    };
                }
                Some(
                    Keyword::Is
                    | Keyword::Isnull
                    | Keyword::Notnull
                    | Keyword::Not
                    | Keyword::In
                    | Keyword::Between
                    | Keyword::Like
                    | Keyword::Glob
                    | Keyword::Match
                    | Keyword::Regexp,
                ) => {
                    if EQUALITY_BP.0 < min_bp {
                        break;
                    }
                    lhs = self.parse_predicate(lhs)?;
                }
                _ => break,
            }
        }

        Ok(lhs)
    }

    /// Parses the predicate following `lhs`: `IS [NOT] ...`, `ISNULL`,
    /// `NOTNULL`, `NOT NULL` or a possibly negated BETWEEN/IN/LIKE-family
    /// operator.
    fn parse_predicate(&mut self, lhs: Expression) -> Result<Expression, ParseError> {
        let expression = Box::new(lhs);
        match self.current().as_keyword() {
            Some(Keyword::Isnull) => {
                self.advance();
                Ok(Expression::Null {
                    expression,
                    invert: false,
                })
            }
            Some(Keyword::Notnull) => {
                self.advance();
                Ok(Expression::Null {
                    expression,
                    invert: true,
                })
            }
            Some(Keyword::Is) => {
                self.advance();
                let invert = self.consume_keyword(Keyword::Not);
                if self.consume_keyword(Keyword::Null) {
                    return Ok(Expression::Null { expression, invert });
                }
                let rhs = self.parse_expr_bp(PREDICATE_RHS_BP)?;
                Ok(Expression::Is {
                    lhs: expression,
                    rhs: Box::new(rhs),
                    invert,
                })
            }
            Some(Keyword::Not) => {
                self.advance();
                if self.consume_keyword(Keyword::Null) {
                    return Ok(Expression::Null {
                        expression,
                        invert: true,
                    });
                }
                self.parse_negatable_predicate(expression, true)
            }
            _ => self.parse_negatable_predicate(expression, false),
        }
    }

    fn parse_negatable_predicate(
        &mut self,
        expression: Box<Expression>,
        invert: bool,
    ) -> Result<Expression, ParseError> {
        let Some(keyword) = self.current().as_keyword() else {
            return Err(self.unexpected("BETWEEN, IN, LIKE, GLOB, MATCH, REGEXP, or NULL"));
        };

        if keyword == Keyword::Between {
            self.advance();
            let lhs = self.parse_expr_bp(PREDICATE_RHS_BP)?;
            self.expect_keyword(Keyword::And)?;
            let rhs = self.parse_expr_bp(PREDICATE_RHS_BP)?;
            return Ok(Expression::Between {
                expression,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                invert,
            });
        }

        if keyword == Keyword::In {
            self.advance();
            if self.consume(&TokenKind::LeftParen) {
                let chain = if self.check(&TokenKind::RightParen) {
                    vec![]
                } else {
                    self.parse_comma_separated(|parser| parser.parse_expr_bp(0))?
                };
                self.expect(&TokenKind::RightParen)?;
                return Ok(Expression::InChained {
                    expression,
                    chain,
                    invert,
                });
            }
            let (schema, table) = self.parse_qualified_name("table name")?;
            return Ok(Expression::InTable {
                expression,
                schema,
                table,
                invert,
            });
        }

        let Some(op) = keyword_to_match_op(keyword) else {
            return Err(self.unexpected("BETWEEN, IN, LIKE, GLOB, MATCH, REGEXP, or NULL"));
        };
        self.advance();
        let rhs = self.parse_expr_bp(PREDICATE_RHS_BP)?;
        let escape = if self.consume_keyword(Keyword::Escape) {
            Some(Box::new(self.parse_expr_bp(PREDICATE_RHS_BP)?))
        } else {
            None
        };
        Ok(Expression::Match {
            op,
            lhs: expression,
            rhs: Box::new(rhs),
            escape,
            invert,
        })
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expression, ParseError> {
        if let Some(op) = token_to_unary_op(&self.current().kind) {
            self.advance();
            let operand = self.parse_expr_bp(PREFIX_BP)?;
            return Ok(Expression::unary(op, operand));
        }

        self.parse_primary()
    }

    /// Parses a primary expression.
    #[allow(clippy::cast_precision_loss)]
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let token = self.current().clone();
        let token_is_name = is_name(&token);

        let expression = match token.kind {
            TokenKind::Integer(value) => Expression::NumericLiteral(value as f64),
            TokenKind::Float(value) => Expression::NumericLiteral(value),
            TokenKind::String(value) => Expression::StringLiteral(value),
            TokenKind::Blob(bytes) => Expression::BlobLiteral(bytes),
            TokenKind::Keyword(Keyword::Null) => Expression::NullLiteral,
            TokenKind::Keyword(Keyword::Cast) => return self.parse_cast_expression(),
            TokenKind::Keyword(Keyword::Case) => return self.parse_case_expression(),
            TokenKind::LeftParen => {
                self.advance();
                let expressions = self.parse_comma_separated(|parser| parser.parse_expr_bp(0))?;
                self.expect(&TokenKind::RightParen)?;
                return Ok(Expression::Chained(expressions));
            }
            _ if token_is_name => return self.parse_column_name(),
            _ => return Err(self.unexpected("expression")),
        };

        self.advance();
        Ok(expression)
    }

    /// Parses `[[schema.]table.]column`.
    fn parse_column_name(&mut self) -> Result<Expression, ParseError> {
        let mut parts = vec![self.expect_name("column name")?];
        while parts.len() < 3 && self.consume(&TokenKind::Dot) {
            parts.push(self.expect_name("column name")?);
        }

        let column = parts.pop().unwrap_or_default();
        let table = parts.pop();
        let schema = parts.pop();
        Ok(Expression::ColumnName {
            schema,
            table,
            column,
        })
    }

    /// Parses `CAST(expr AS type)`.
    fn parse_cast_expression(&mut self) -> Result<Expression, ParseError> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expression = self.parse_expr_bp(0)?;
        self.expect_keyword(Keyword::As)?;
        let type_name = self.parse_type_name()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expression::Cast {
            expression: Box::new(expression),
            type_name,
        })
    }

    /// Parses `CASE [expr] WHEN ... THEN ... [ELSE ...] END`.
    fn parse_case_expression(&mut self) -> Result<Expression, ParseError> {
        self.expect_keyword(Keyword::Case)?;

        let case_expression = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(self.parse_expr_bp(0)?)
        };

        let mut when_then_clauses = Vec::new();
        while self.consume_keyword(Keyword::When) {
            let when = self.parse_expr_bp(0)?;
            self.expect_keyword(Keyword::Then)?;
            let then = self.parse_expr_bp(0)?;
            when_then_clauses.push(WhenThenClause::new(when, then));
        }
        if when_then_clauses.is_empty() {
            return Err(self.unexpected("WHEN"));
        }

        let else_expression = if self.consume_keyword(Keyword::Else) {
            Some(self.parse_expr_bp(0)?)
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;

        Ok(Expression::Case(CaseExpression::new(
            case_expression,
            when_then_clauses,
            else_expression,
        )))
    }

    // --- Helper methods ---

    fn current(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Returns the token `n` positions ahead, clamped to the final `Eof`.
    fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Advances to the next token; never moves past `Eof`.
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current().kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.check_keyword(keyword);
        if matched {
            self.advance();
        }
        matched
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.consume_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects and returns a name. Keywords used as names keep the spelling
    /// they have in the source.
    fn expect_name(&mut self, what: &str) -> Result<String, ParseError> {
        let token = self.current();
        let name = match &token.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(_) if is_name(token) => token.span.text(self.source).to_owned(),
            _ => return Err(self.unexpected(what)),
        };
        self.advance();
        Ok(name)
    }

    /// Builds the error for finding the current token where `expected` was
    /// required. Lexer errors are reported with their own message.
    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.current();
        match &token.kind {
            TokenKind::Eof => ParseError::unexpected_eof(expected, token.span),
            TokenKind::Error(message) => ParseError {
                message: message.clone(),
                span: token.span,
                expected: Some(expected.into()),
                found: Some(token.kind.clone()),
            },
            kind => ParseError::unexpected(expected, kind.clone(), token.span),
        }
    }

    /// Runs `parse` one nesting level deeper. Fails with `message` once the
    /// input nests past [`Parser::MAX_DEPTH`].
    fn nested<T>(
        &mut self,
        message: &str,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= Self::MAX_DEPTH {
            return Err(ParseError::new(message, self.current().span));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parses one or more items separated by commas.
    fn parse_comma_separated<T>(
        &mut self,
        mut parse_item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![parse_item(self)?];
        while self.consume(&TokenKind::Comma) {
            items.push(parse_item(self)?);
        }
        Ok(items)
    }
}
