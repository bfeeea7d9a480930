//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for SQL that produces a stream of tokens.
//! The parser consumes the stream produced by [`Lexer::tokenize`]; malformed input is
//! surfaced as [`TokenKind::Error`] tokens rather than failures, so the parser can
//! attach a position to the diagnostic.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
