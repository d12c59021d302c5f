//! Operator levels of the grammar.

use algex_expr::node::BinaryKind;
use crate::tokenizer::{Token, TokenKind};

/// The operator levels, in increasing binding strength. Splitting starts at the weakest level.
pub const LEVELS: [OpLevel; 8] = [
    OpLevel::Eq,
    OpLevel::Comma,
    OpLevel::Add,
    OpLevel::Sub,
    OpLevel::Div,
    OpLevel::Mul,
    OpLevel::Pow,
    OpLevel::Root,
];

/// A level of the operator grammar, identified by its operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OpLevel {
    Eq,
    Comma,
    Add,
    Sub,
    Div,
    Mul,
    Pow,
    Root,
}

impl OpLevel {
    /// Returns the level of the operator represented by the given token, if it is one.
    pub fn of(token: &Token) -> Option<Self> {
        match token.kind {
            TokenKind::Eq => Some(Self::Eq),
            TokenKind::Comma => Some(Self::Comma),
            TokenKind::Add => Some(Self::Add),
            TokenKind::Sub => Some(Self::Sub),
            TokenKind::Div => Some(Self::Div),
            TokenKind::Mul => Some(Self::Mul),
            TokenKind::Pow => Some(Self::Pow),
            TokenKind::Name if token.is_root() => Some(Self::Root),
            _ => None,
        }
    }

    /// Returns the next stronger level, or [`None`] if this is the strongest.
    pub fn next(self) -> Option<Self> {
        LEVELS.iter().position(|&level| level == self)
            .and_then(|i| LEVELS.get(i + 1))
            .copied()
    }

    /// Returns the binary node kind built by this level. Commas build an n-ary sequence instead.
    pub fn binary_kind(self) -> Option<BinaryKind> {
        match self {
            Self::Eq => Some(BinaryKind::Equality),
            Self::Comma => None,
            Self::Add => Some(BinaryKind::Addition),
            Self::Sub => Some(BinaryKind::Subtraction),
            Self::Div => Some(BinaryKind::Division),
            Self::Mul => Some(BinaryKind::Multiplication),
            Self::Pow => Some(BinaryKind::Power),
            Self::Root => Some(BinaryKind::Root),
        }
    }

    /// Returns true if the operator of this level can also be a sign prefix.
    pub fn is_sign(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(LEVELS.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(OpLevel::Sub.next(), Some(OpLevel::Div));
        assert_eq!(OpLevel::Root.next(), None);
    }

    #[test]
    fn root_operator_is_a_name() {
        let root = Token { span: 0..1, kind: TokenKind::Name, lexeme: "v" };
        let name = Token { span: 0..1, kind: TokenKind::Name, lexeme: "w" };
        assert_eq!(OpLevel::of(&root), Some(OpLevel::Root));
        assert_eq!(OpLevel::of(&name), None);
    }
}
