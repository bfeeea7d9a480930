//! Binding powers for the Pratt expression parser.
//!
//! Each precedence tier `p` of [`BinaryOperator::precedence`] maps to the
//! binding-power pair `(2p - 1, 2p)` for left-associative operators and
//! `(2p, 2p - 1)` for right-associative ones, so the parser and the SQL
//! renderer agree on grouping.

use crate::ast::{BinaryOperator, MatchOperator, UnaryOperator};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of the equality tier, shared by the `IS`, `BETWEEN`, `IN`,
/// `LIKE`-family and null-check predicates.
pub const EQUALITY_BP: (u8, u8) = binding_power(BinaryOperator::EQUALITY_PRECEDENCE, false);

/// Right binding power for the operands that follow a predicate keyword
/// (`BETWEEN` bounds, `LIKE` patterns, `IS` right-hand sides). One above the
/// equality tier so `x BETWEEN a AND b` does not swallow the `AND`.
pub const PREDICATE_RHS_BP: u8 = EQUALITY_BP.1;

/// Binding power of unary prefix operators.
pub const PREFIX_BP: u8 = UnaryOperator::PRECEDENCE * 2 - 1;

/// Left binding power of the postfix `COLLATE` operator.
pub const COLLATE_BP: u8 = UnaryOperator::PRECEDENCE * 2 + 1;

const fn binding_power(precedence: u8, right_associative: bool) -> (u8, u8) {
    if right_associative {
        (precedence * 2, precedence * 2 - 1)
    } else {
        (precedence * 2 - 1, precedence * 2)
    }
}

/// Returns the infix binding power for a binary operator.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
/// - Right associative: left_bp > right_bp
#[must_use]
pub const fn infix_binding_power(op: BinaryOperator) -> (u8, u8) {
    binding_power(op.precedence(), op.is_right_associative())
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Concat => Some(BinaryOperator::Concat),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::LeftShift => Some(BinaryOperator::LeftShift),
        TokenKind::RightShift => Some(BinaryOperator::RightShift),
        TokenKind::BitAnd => Some(BinaryOperator::BitAnd),
        TokenKind::BitOr => Some(BinaryOperator::BitOr),
        TokenKind::Lt => Some(BinaryOperator::Lt),
        TokenKind::LtEq => Some(BinaryOperator::LtEq),
        TokenKind::Gt => Some(BinaryOperator::Gt),
        TokenKind::GtEq => Some(BinaryOperator::GtEq),
        TokenKind::Eq => Some(BinaryOperator::Eq),
        TokenKind::NotEq => Some(BinaryOperator::NotEq),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOperator::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOperator::Or),
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOperator> {
    match kind {
        TokenKind::Minus => Some(UnaryOperator::Minus),
        TokenKind::Plus => Some(UnaryOperator::Plus),
        TokenKind::BitNot => Some(UnaryOperator::BitNot),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOperator::Not),
        _ => None,
    }
}

/// Converts a keyword to a pattern-matching operator.
#[must_use]
pub const fn keyword_to_match_op(keyword: Keyword) -> Option<MatchOperator> {
    match keyword {
        Keyword::Like => Some(MatchOperator::Like),
        Keyword::Glob => Some(MatchOperator::Glob),
        Keyword::Match => Some(MatchOperator::Match),
        Keyword::Regexp => Some(MatchOperator::Regexp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        let add_bp = infix_binding_power(BinaryOperator::Add);
        let mul_bp = infix_binding_power(BinaryOperator::Mul);
        assert!(mul_bp.0 > add_bp.0);

        let and_bp = infix_binding_power(BinaryOperator::And);
        let or_bp = infix_binding_power(BinaryOperator::Or);
        assert!(and_bp.0 > or_bp.0);

        let eq_bp = infix_binding_power(BinaryOperator::Eq);
        assert!(eq_bp.0 > and_bp.0);
        assert_eq!(eq_bp, EQUALITY_BP);

        let lt_bp = infix_binding_power(BinaryOperator::Lt);
        assert!(lt_bp.0 > eq_bp.0);
    }

    #[test]
    fn test_binding_power_values() {
        assert_eq!(infix_binding_power(BinaryOperator::Or), (1, 2));
        assert_eq!(infix_binding_power(BinaryOperator::And), (3, 4));
        assert_eq!(EQUALITY_BP, (5, 6));
        assert_eq!(infix_binding_power(BinaryOperator::Mul), (15, 16));
        assert_eq!(infix_binding_power(BinaryOperator::Concat), (18, 17));
        assert_eq!(PREFIX_BP, 19);
        assert_eq!(COLLATE_BP, 21);
    }

    #[test]
    fn test_associativity() {
        let (left, right) = infix_binding_power(BinaryOperator::Sub);
        assert!(left < right);

        let (left, right) = infix_binding_power(BinaryOperator::Concat);
        assert!(left > right);
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        let concat_bp = infix_binding_power(BinaryOperator::Concat);
        assert!(PREFIX_BP > concat_bp.0);
        assert!(COLLATE_BP > PREFIX_BP);
    }

    #[test]
    fn test_token_to_binary_op() {
        assert_eq!(
            token_to_binary_op(&TokenKind::Plus),
            Some(BinaryOperator::Add)
        );
        assert_eq!(
            token_to_binary_op(&TokenKind::NotEq),
            Some(BinaryOperator::NotEq)
        );
        assert_eq!(
            token_to_binary_op(&TokenKind::Keyword(Keyword::Or)),
            Some(BinaryOperator::Or)
        );
        assert_eq!(token_to_binary_op(&TokenKind::LeftParen), None);
    }

    #[test]
    fn test_token_to_unary_op() {
        assert_eq!(
            token_to_unary_op(&TokenKind::Minus),
            Some(UnaryOperator::Minus)
        );
        assert_eq!(
            token_to_unary_op(&TokenKind::Keyword(Keyword::Not)),
            Some(UnaryOperator::Not)
        );
        assert_eq!(token_to_unary_op(&TokenKind::Star), None);
    }

    #[test]
    fn test_keyword_to_match_op() {
        assert_eq!(keyword_to_match_op(Keyword::Glob), Some(MatchOperator::Glob));
        assert_eq!(keyword_to_match_op(Keyword::Is), None);
    }
}
