//! Expression AST types.

use super::TypeName;

/// Binary operators, from highest to lowest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOperator {
    // String
    Concat,

    // Arithmetic
    Mul,
    Div,
    Mod,
    Add,
    Sub,

    // Bitwise
    LeftShift,
    RightShift,
    BitAnd,
    BitOr,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,

    // Logical
    And,
    Or,
}

impl BinaryOperator {
    /// Precedence shared by `=`/`<>` and the `IS`, `BETWEEN`, `IN` and
    /// `LIKE`-family predicates.
    pub const EQUALITY_PRECEDENCE: u8 = 3;

    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Concat => "||",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq => Self::EQUALITY_PRECEDENCE,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 4,
            Self::BitAnd | Self::BitOr => 5,
            Self::LeftShift | Self::RightShift => 6,
            Self::Add | Self::Sub => 7,
            Self::Mul | Self::Div | Self::Mod => 8,
            Self::Concat => 9,
        }
    }

    /// Concatenation groups to the right; every other operator to the left.
    #[must_use]
    pub const fn is_right_associative(&self) -> bool {
        matches!(self, Self::Concat)
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOperator {
    /// Negation (-)
    Minus,
    /// Identity (+)
    Plus,
    /// Bitwise NOT (~)
    BitNot,
    /// Logical NOT
    Not,
}

impl UnaryOperator {
    /// Binds tighter than every binary operator.
    pub const PRECEDENCE: u8 = 10;

    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minus => "-",
            Self::Plus => "+",
            Self::BitNot => "~",
            Self::Not => "NOT",
        }
    }
}

/// Pattern-matching operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MatchOperator {
    Like,
    Glob,
    Match,
    Regexp,
}

impl MatchOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Glob => "GLOB",
            Self::Match => "MATCH",
            Self::Regexp => "REGEXP",
        }
    }
}

/// One `WHEN ... THEN ...` arm of a CASE expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WhenThenClause {
    when: Expression,
    then: Expression,
}

impl WhenThenClause {
    #[must_use]
    pub const fn new(when: Expression, then: Expression) -> Self {
        Self { when, then }
    }

    /// The condition (or the value compared against the CASE operand).
    #[must_use]
    pub const fn when(&self) -> &Expression {
        &self.when
    }

    /// The result when the arm matches.
    #[must_use]
    pub const fn then(&self) -> &Expression {
        &self.then
    }
}

/// `CASE [expr] WHEN ... THEN ... [ELSE ...] END`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CaseExpression {
    case_expression: Option<Box<Expression>>,
    when_then_clauses: Vec<WhenThenClause>,
    else_expression: Option<Box<Expression>>,
}

impl CaseExpression {
    /// Creates a CASE expression.
    ///
    /// # Panics
    ///
    /// Panics if `when_then_clauses` is empty.
    #[must_use]
    pub fn new(
        case_expression: Option<Expression>,
        when_then_clauses: Vec<WhenThenClause>,
        else_expression: Option<Expression>,
    ) -> Self {
        assert!(
            !when_then_clauses.is_empty(),
            "a CASE expression needs at least one WHEN clause"
        );
        Self {
            case_expression: case_expression.map(Box::new),
            when_then_clauses,
            else_expression: else_expression.map(Box::new),
        }
    }

    /// The operand of a simple CASE (`CASE x WHEN 1 ...`).
    #[must_use]
    pub fn case_expression(&self) -> Option<&Expression> {
        self.case_expression.as_deref()
    }

    /// The WHEN/THEN arms, never empty.
    #[must_use]
    pub fn when_then_clauses(&self) -> &[WhenThenClause] {
        &self.when_then_clauses
    }

    /// The ELSE result.
    #[must_use]
    pub fn else_expression(&self) -> Option<&Expression> {
        self.else_expression.as_deref()
    }
}

/// An SQL expression.
///
/// The predicate variants (`Match`, `Null`, `Is`, `Between`, `InChained`,
/// `InTable`) carry an `invert` flag set when the predicate was written
/// negated (`NOT LIKE`, `IS NOT`, `NOT BETWEEN`, ...): the negated form shares
/// the node shape of the positive one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expression {
    /// Placeholder for an expression that failed to parse.
    Error,

    /// Numeric literal (integer, float or hexadecimal).
    NumericLiteral(f64),
    /// String literal.
    StringLiteral(String),
    /// Blob literal (`X'..'`).
    BlobLiteral(Vec<u8>),
    /// NULL literal.
    NullLiteral,

    /// A column reference, optionally qualified with table and schema.
    ColumnName {
        schema: Option<String>,
        table: Option<String>,
        column: String,
    },

    /// A unary expression.
    Unary {
        op: UnaryOperator,
        expression: Box<Expression>,
    },

    /// A binary expression.
    Binary {
        op: BinaryOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },

    /// A parenthesized list: `(a)` or `(a, b, c)`.
    Chained(Vec<Expression>),

    /// `CAST(expression AS type_name)`.
    Cast {
        expression: Box<Expression>,
        type_name: TypeName,
    },

    /// CASE expression.
    Case(CaseExpression),

    /// `expression COLLATE collation_name`.
    Collate {
        expression: Box<Expression>,
        collation_name: String,
    },

    /// `lhs [NOT] LIKE|GLOB|MATCH|REGEXP rhs [ESCAPE escape]`.
    Match {
        op: MatchOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
        escape: Option<Box<Expression>>,
        invert: bool,
    },

    /// `expression IS [NOT] NULL`, `ISNULL`, `NOTNULL`, `NOT NULL`.
    Null {
        expression: Box<Expression>,
        invert: bool,
    },

    /// `lhs IS [NOT] rhs`.
    Is {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
        invert: bool,
    },

    /// `expression [NOT] BETWEEN lhs AND rhs`.
    Between {
        expression: Box<Expression>,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
        invert: bool,
    },

    /// `expression [NOT] IN (chain...)`.
    InChained {
        expression: Box<Expression>,
        chain: Vec<Expression>,
        invert: bool,
    },

    /// `expression [NOT] IN [schema.]table`.
    InTable {
        expression: Box<Expression>,
        schema: Option<String>,
        table: String,
        invert: bool,
    },
}

impl Expression {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::ColumnName {
            schema: None,
            table: None,
            column: name.into(),
        }
    }

    /// Creates a table-qualified column reference.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::ColumnName {
            schema: None,
            table: Some(table.into()),
            column: name.into(),
        }
    }

    /// Creates a numeric literal.
    #[must_use]
    pub const fn numeric(value: f64) -> Self {
        Self::NumericLiteral(value)
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral(value.into())
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOperator, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    /// Creates a unary expression.
    #[must_use]
    pub fn unary(op: UnaryOperator, expression: Self) -> Self {
        Self::Unary {
            op,
            expression: Box::new(expression),
        }
    }

    /// Returns true for the parse-failure placeholder.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns the inversion flag of a predicate, or `None` for expressions
    /// that cannot be written negated.
    #[must_use]
    pub const fn inverted(&self) -> Option<bool> {
        match self {
            Self::Match { invert, .. }
            | Self::Null { invert, .. }
            | Self::Is { invert, .. }
            | Self::Between { invert, .. }
            | Self::InChained { invert, .. }
            | Self::InTable { invert, .. } => Some(*invert),
            _ => None,
        }
    }

    /// Returns the binding strength of an operator expression, or `None` for
    /// expressions that are self-delimiting (literals, names, parentheses, ...).
    #[must_use]
    pub const fn precedence(&self) -> Option<u8> {
        match self {
            Self::Binary { op, .. } => Some(op.precedence()),
            Self::Unary { .. } => Some(UnaryOperator::PRECEDENCE),
            Self::Match { .. }
            | Self::Null { .. }
            | Self::Is { .. }
            | Self::Between { .. }
            | Self::InChained { .. }
            | Self::InTable { .. } => Some(BinaryOperator::EQUALITY_PRECEDENCE),
            _ => None,
        }
    }
}
