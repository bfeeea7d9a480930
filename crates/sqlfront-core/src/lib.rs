//! # sqlfront-core
//!
//! A SQL front-end: turns SQL text into a typed syntax tree.
//!
//! This crate provides:
//! - A lexer producing spanned tokens
//! - A hand-written recursive descent parser with Pratt expression parsing
//! - An owned AST for `CREATE TABLE`, `DROP TABLE`, `DELETE` and `SELECT`
//! - SQL rendering of every AST node through `Display`
//!
//! Malformed input never panics. Each broken statement is returned as
//! [`Statement::Error`] with one diagnostic, and parsing resumes after its
//! terminating `;`:
//!
//! ```rust
//! use sqlfront_core::{Parser, Statement};
//!
//! let mut parser = Parser::new("DROP TABLE; DROP TABLE IF EXISTS users;");
//!
//! assert!(parser.next_statement().is_error());
//! let Statement::DropTable(drop) = parser.next_statement() else {
//!     unreachable!();
//! };
//! assert_eq!(drop.table(), "users");
//! assert!(!drop.is_error_if_table_does_not_exist());
//!
//! assert!(parser.is_at_end());
//! assert_eq!(parser.errors().len(), 1);
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use sqlfront_core::parse_statements;
//!
//! let (statements, errors) = parse_statements("select a+b*c from t where x not null;");
//! assert!(errors.is_empty());
//! assert_eq!(
//!     statements[0].to_string(),
//!     "SELECT a + b * c FROM t WHERE x IS NOT NULL;"
//! );
//! ```
//!
//! ## Features
//!
//! - `serde`: derives `serde::Serialize` for every AST node.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Expression, Statement};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, Parser, parse_statements};
