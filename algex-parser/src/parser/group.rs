//! Extraction of grouped fragments.
//!
//! Before operators are split, every `(...)` and `[...]` group is moved out of the item list into
//! a [`Fragment`] and replaced by a single [`Item::Group`] placeholder, so that the remaining
//! items are flat. Parentheses are extracted first, innermost and rightmost first; brackets are
//! extracted once no parentheses remain. The contents of each fragment are extracted the same way
//! when the fragment itself is parsed.

use algex_error::Error;
use crate::tokenizer::{Token, TokenKind};
use std::ops::Range;
use super::error::{MismatchedGroup, UnclosedGroup};

/// A flat item to be split by operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Item<'source> {
    /// A token of the source.
    Token(Token<'source>),

    /// A placeholder for an extracted group, indexing into the fragment list.
    Group {
        index: usize,
        span: Range<usize>,
    },
}

impl<'source> Item<'source> {
    /// Returns the region of the source code this item covers.
    pub fn span(&self) -> Range<usize> {
        match self {
            Item::Token(token) => token.span.clone(),
            Item::Group { span, .. } => span.clone(),
        }
    }

    /// Returns the token of this item, if it is not a group.
    pub fn token(&self) -> Option<&Token<'source>> {
        match self {
            Item::Token(token) => Some(token),
            Item::Group { .. } => None,
        }
    }

    /// Returns true if this item is a token of the given kind.
    fn is(&self, kind: TokenKind) -> bool {
        self.token().is_some_and(|token| token.kind == kind)
    }
}

/// How an extracted group is turned into an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupKind {
    /// `(...)`.
    Paren,

    /// `[...]`.
    Bracket,

    /// `name(...)`, a function call.
    Call(String),
}

/// The contents of an extracted group.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment<'source> {
    pub kind: GroupKind,

    /// The items between the delimiters.
    pub items: Vec<Item<'source>>,

    /// The region of the source code covering the whole group, including the callee name.
    pub span: Range<usize>,
}

/// A pair of grouping delimiters.
#[derive(Debug, Clone, Copy)]
struct Delimiters {
    open: TokenKind,
    close: TokenKind,
    bracket: bool,
}

const PARENS: Delimiters = Delimiters {
    open: TokenKind::OpenParen,
    close: TokenKind::CloseParen,
    bracket: false,
};

const BRACKETS: Delimiters = Delimiters {
    open: TokenKind::OpenBracket,
    close: TokenKind::CloseBracket,
    bracket: true,
};

/// Replaces every group in `items` by a placeholder, appending the extracted fragments to
/// `fragments`.
pub fn extract<'source>(
    mut items: Vec<Item<'source>>,
    fragments: &mut Vec<Fragment<'source>>,
) -> Result<Vec<Item<'source>>, Error> {
    for delimiters in [PARENS, BRACKETS] {
        while let Some(open) = items.iter().rposition(|item| item.is(delimiters.open)) {
            let close = items[open + 1..]
                .iter()
                .position(|item| item.is(delimiters.close))
                .map(|offset| open + 1 + offset)
                .ok_or_else(|| Error::new(
                    vec![items[open].span()],
                    UnclosedGroup { opening: true, bracket: delimiters.bracket },
                ))?;

            if !delimiters.bracket {
                check_brackets(&items[open..=close])?;
            }

            let start = match items.get(open.wrapping_sub(1)).and_then(Item::token) {
                Some(token) if !delimiters.bracket
                    && token.kind == TokenKind::Name
                    && !token.is_root() => open - 1,
                _ => open,
            };
            let kind = if delimiters.bracket {
                GroupKind::Bracket
            } else if start < open {
                // checked above that this is a name token
                GroupKind::Call(items[start].token().map_or("", |token| token.lexeme).to_string())
            } else {
                GroupKind::Paren
            };

            let span = items[start].span().start..items[close].span().end;
            let index = fragments.len();
            let mut removed = items
                .splice(start..=close, [Item::Group { index, span: span.clone() }])
                .collect::<Vec<_>>();
            removed.pop();
            let inner = removed.split_off(open - start + 1);

            log::trace!("extracted {:?} group #{} at {:?}", kind, index, span);
            fragments.push(Fragment { kind, items: inner, span });
        }

        if let Some(stray) = items.iter().find(|item| item.is(delimiters.close)) {
            return Err(Error::new(
                vec![stray.span()],
                UnclosedGroup { opening: false, bracket: delimiters.bracket },
            ));
        }
    }

    Ok(items)
}

/// Checks that the brackets inside a parenthesized group (delimiters included) are balanced, so
/// that the two kinds of groups do not cross each other.
fn check_brackets(group: &[Item]) -> Result<(), Error> {
    let mut open = Vec::new();
    for item in group {
        if item.is(TokenKind::OpenBracket) {
            open.push(item.span());
        } else if item.is(TokenKind::CloseBracket) && open.pop().is_none() {
            return Err(mismatched(group, item.span()));
        }
    }

    match open.pop() {
        Some(span) => Err(mismatched(group, span)),
        None => Ok(()),
    }
}

fn mismatched(group: &[Item], crossing: Range<usize>) -> Error {
    let start = group.first().map_or(0, |item| item.span().start);
    let end = group.last().map_or(start, |item| item.span().end);
    Error::new(vec![start..end, crossing], MismatchedGroup)
}
