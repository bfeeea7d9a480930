//! Token types for the SQL lexer.

use core::fmt;

use super::Span;

/// SQL keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Statements
    Create,
    Drop,
    Delete,
    Select,
    With,

    // DDL modifiers
    Table,
    Temp,
    Temporary,
    If,
    Exists,

    // Clauses
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    Returning,
    Distinct,
    All,
    As,
    Recursive,

    // Operators
    And,
    Or,
    Not,
    In,
    Is,
    Isnull,
    Notnull,
    Null,
    Between,
    Like,
    Glob,
    Match,
    Regexp,
    Escape,
    Collate,

    // Ordering
    Asc,
    Desc,
    Nulls,
    First,
    Last,

    // Nested expressions
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Some(Self::Create),
            "DROP" => Some(Self::Drop),
            "DELETE" => Some(Self::Delete),
            "SELECT" => Some(Self::Select),
            "WITH" => Some(Self::With),
            "TABLE" => Some(Self::Table),
            "TEMP" => Some(Self::Temp),
            "TEMPORARY" => Some(Self::Temporary),
            "IF" => Some(Self::If),
            "EXISTS" => Some(Self::Exists),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "GROUP" => Some(Self::Group),
            "BY" => Some(Self::By),
            "HAVING" => Some(Self::Having),
            "ORDER" => Some(Self::Order),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "RETURNING" => Some(Self::Returning),
            "DISTINCT" => Some(Self::Distinct),
            "ALL" => Some(Self::All),
            "AS" => Some(Self::As),
            "RECURSIVE" => Some(Self::Recursive),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "IN" => Some(Self::In),
            "IS" => Some(Self::Is),
            "ISNULL" => Some(Self::Isnull),
            "NOTNULL" => Some(Self::Notnull),
            "NULL" => Some(Self::Null),
            "BETWEEN" => Some(Self::Between),
            "LIKE" => Some(Self::Like),
            "GLOB" => Some(Self::Glob),
            "MATCH" => Some(Self::Match),
            "REGEXP" => Some(Self::Regexp),
            "ESCAPE" => Some(Self::Escape),
            "COLLATE" => Some(Self::Collate),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "NULLS" => Some(Self::Nulls),
            "FIRST" => Some(Self::First),
            "LAST" => Some(Self::Last),
            "CASE" => Some(Self::Case),
            "WHEN" => Some(Self::When),
            "THEN" => Some(Self::Then),
            "ELSE" => Some(Self::Else),
            "END" => Some(Self::End),
            "CAST" => Some(Self::Cast),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Delete => "DELETE",
            Self::Select => "SELECT",
            Self::With => "WITH",
            Self::Table => "TABLE",
            Self::Temp => "TEMP",
            Self::Temporary => "TEMPORARY",
            Self::If => "IF",
            Self::Exists => "EXISTS",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Returning => "RETURNING",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::As => "AS",
            Self::Recursive => "RECURSIVE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Isnull => "ISNULL",
            Self::Notnull => "NOTNULL",
            Self::Null => "NULL",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::Glob => "GLOB",
            Self::Match => "MATCH",
            Self::Regexp => "REGEXP",
            Self::Escape => "ESCAPE",
            Self::Collate => "COLLATE",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Nulls => "NULLS",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Cast => "CAST",
        }
    }

    /// Returns true if the keyword can never be used as a name.
    ///
    /// Non-reserved keywords (`TABLE`, `TEMP`, `IF`, `ASC`, ...) fall back to
    /// identifiers wherever the grammar expects a name, so `DELETE FROM table;`
    /// names a table called `table`.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        !matches!(
            self,
            Self::Table
                | Self::Temp
                | Self::Temporary
                | Self::If
                | Self::Exists
                | Self::Offset
                | Self::Recursive
                | Self::Match
                | Self::Asc
                | Self::Desc
                | Self::Nulls
                | Self::First
                | Self::Last
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42 or 0xff)
    Integer(i64),
    /// Float literal (e.g., 3.14 or 1e3)
    Float(f64),
    /// String literal (e.g., 'hello')
    String(String),
    /// Blob literal (e.g., X'1234')
    Blob(Vec<u8>),

    // Identifiers and keywords
    /// Identifier (e.g., column_name, "quoted name")
    Identifier(String),
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// = or ==
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "number {n}"),
            Self::Float(n) => write!(f, "number {n}"),
            Self::String(s) => write!(f, "string '{s}'"),
            Self::Blob(_) => f.write_str("blob literal"),
            Self::Identifier(name) => write!(f, "identifier \"{name}\""),
            Self::Keyword(kw) => write!(f, "keyword {kw}"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::Percent => f.write_str("'%'"),
            Self::Eq => f.write_str("'='"),
            Self::NotEq => f.write_str("'<>'"),
            Self::Lt => f.write_str("'<'"),
            Self::LtEq => f.write_str("'<='"),
            Self::Gt => f.write_str("'>'"),
            Self::GtEq => f.write_str("'>='"),
            Self::Concat => f.write_str("'||'"),
            Self::BitAnd => f.write_str("'&'"),
            Self::BitOr => f.write_str("'|'"),
            Self::BitNot => f.write_str("'~'"),
            Self::LeftShift => f.write_str("'<<'"),
            Self::RightShift => f.write_str("'>>'"),
            Self::LeftParen => f.write_str("'('"),
            Self::RightParen => f.write_str("')'"),
            Self::Comma => f.write_str("','"),
            Self::Semicolon => f.write_str("';'"),
            Self::Dot => f.write_str("'.'"),
            Self::Eof => f.write_str("end of input"),
            Self::Error(message) => f.write_str(message),
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
