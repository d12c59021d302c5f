use algex_error::Error;
use algex_expr::{node::{BinaryKind, Nary, NaryKind}, Expr};
use crate::tokenizer::TokenKind;
use super::{
    error::{EmptyGroup, EmptyOperand, MissingOperator, UnrecognizedToken},
    group::{self, GroupKind, Item},
    op::{OpLevel, LEVELS},
    Parser,
};

/// Returns the level of the operator represented by the item, if it is one.
fn operator(item: &Item) -> Option<OpLevel> {
    item.token().and_then(OpLevel::of)
}

/// Returns the node kind of the sign prefix represented by the item, if it is one.
fn sign(item: &Item) -> Option<BinaryKind> {
    match operator(item)? {
        OpLevel::Add => Some(BinaryKind::Addition),
        OpLevel::Sub => Some(BinaryKind::Subtraction),
        _ => None,
    }
}

impl<'source> Parser<'source> {
    /// Splits a non-empty slice of flat items at the operators of the given level, descending to
    /// stronger levels when there are none.
    pub(super) fn split(&mut self, items: &[Item<'source>], level: OpLevel) -> Result<Expr, Error> {
        if level > OpLevel::Sub {
            if let Some(kind) = sign(&items[0]) {
                return self.prefixed(kind, items, level);
            }
        }

        let Some(at) = self.find_operator(items, level) else {
            if level == OpLevel::Sub {
                if let Some(kind) = sign(&items[0]) {
                    return self.prefixed(kind, items, level);
                }
            }

            return match level.next() {
                Some(next) => self.split(items, next),
                None => self.monome(items),
            };
        };

        log::trace!("splitting at {:?} ({:?})", items[at].span(), level);
        let lhs = self.operand(&items[..at], level, &items[at])?;
        let rhs = self.operand(&items[at + 1..], level, &items[at])?;

        Ok(match level.binary_kind() {
            Some(kind) => Expr::binary(kind, lhs, rhs),
            None => match lhs {
                // the rightmost comma is split first, so the left side holds the earlier elements
                Expr::Nary(Nary { kind: NaryKind::Sequence, mut children }) => {
                    children.push(rhs);
                    Expr::sequence(children)
                },
                lhs => Expr::sequence(vec![lhs, rhs]),
            },
        })
    }

    /// Returns the index of the rightmost operator of the given level that has a left operand.
    ///
    /// A `+` or `-` at the start of the items or right after another operator is a sign prefix,
    /// not a binary operator.
    fn find_operator(&self, items: &[Item<'source>], level: OpLevel) -> Option<usize> {
        items.iter().enumerate().rev().find_map(|(i, item)| {
            if operator(item) != Some(level) {
                return None;
            }

            if level.is_sign() && (i == 0 || operator(&items[i - 1]).is_some()) {
                return None;
            }

            Some(i)
        })
    }

    /// Parses one side of an operator.
    fn operand(
        &mut self,
        items: &[Item<'source>],
        level: OpLevel,
        op: &Item<'source>,
    ) -> Result<Expr, Error> {
        if items.is_empty() {
            let operator = self.text(op.span()).to_string();
            return Err(Error::new(vec![op.span()], EmptyOperand { operator }));
        }
        self.split(items, level)
    }

    /// Parses a sign prefix and its operand, as a binary node with an implicit `0` left operand.
    fn prefixed(
        &mut self,
        kind: BinaryKind,
        items: &[Item<'source>],
        level: OpLevel,
    ) -> Result<Expr, Error> {
        let operand = self.operand(&items[1..], level, &items[0])?;
        Ok(Expr::prefixed(kind, operand))
    }

    /// Parses a single operand: a number, a name, or an extracted group.
    fn monome(&mut self, items: &[Item<'source>]) -> Result<Expr, Error> {
        if let [lhs, rhs, ..] = items {
            return Err(Error::new(
                vec![lhs.span(), rhs.span()],
                MissingOperator {
                    lhs: self.text(lhs.span()).to_string(),
                    rhs: self.text(rhs.span()).to_string(),
                },
            ));
        }

        match &items[0] {
            Item::Token(token) => match token.kind {
                // a run of digits always parses, at worst to infinity
                TokenKind::Int => Ok(Expr::constant(token.lexeme.parse().unwrap_or_default())),
                TokenKind::Name => Ok(Expr::symbol(token.lexeme)),
                _ => Err(Error::new(
                    vec![token.span.clone()],
                    UnrecognizedToken { lexeme: token.lexeme.to_string() },
                )),
            },
            Item::Group { index, span } => self.group(*index, span.clone()),
        }
    }

    /// Parses the extracted fragment with the given index.
    fn group(&mut self, index: usize, span: std::ops::Range<usize>) -> Result<Expr, Error> {
        let fragment = &mut self.fragments[index];
        let kind = fragment.kind.clone();
        let items = std::mem::take(&mut fragment.items);

        let items = group::extract(items, &mut self.fragments)?;
        if items.is_empty() {
            return match kind {
                GroupKind::Call(name) => Ok(Expr::call(name, Vec::new())),
                _ => Err(Error::new(
                    vec![span.clone()],
                    EmptyGroup { group: self.text(span).to_string() },
                )),
            };
        }

        let inner = self.split(&items, LEVELS[0])?;
        Ok(match kind {
            GroupKind::Paren => Expr::paren(inner),
            GroupKind::Bracket => Expr::bracket(inner),
            GroupKind::Call(name) => {
                let args = match inner {
                    Expr::Nary(Nary { kind: NaryKind::Sequence, children }) => children,
                    arg => vec![arg],
                };
                Expr::call(name, args)
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use algex_expr::node::UnaryKind;
    use crate::parser::{error::*, parse};
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn num(n: f64) -> Expr {
        Expr::constant(n)
    }

    #[test]
    fn precedence() {
        assert_eq!(
            parse("2+3*4").unwrap(),
            Expr::add(num(2.0), Expr::mul(num(3.0), num(4.0))),
        );
        assert_eq!(
            parse("a=b,c").unwrap(),
            Expr::equality(sym("a"), Expr::sequence(vec![sym("b"), sym("c")])),
        );
        assert_eq!(
            parse("a v 2^3").unwrap(),
            Expr::pow(Expr::root(sym("a"), num(2.0)), num(3.0)),
        );
    }

    #[test]
    fn same_level_folds_left() {
        assert_eq!(
            parse("a-b-c").unwrap(),
            Expr::sub(Expr::sub(sym("a"), sym("b")), sym("c")),
        );
        assert_eq!(
            parse("a+b+c").unwrap(),
            Expr::add(Expr::add(sym("a"), sym("b")), sym("c")),
        );
    }

    #[test]
    fn division_is_weaker_than_multiplication() {
        assert_eq!(
            parse("a/b*c").unwrap(),
            Expr::div(sym("a"), Expr::mul(sym("b"), sym("c"))),
        );
    }

    #[test]
    fn sequence_is_flat() {
        assert_eq!(
            parse("a,b,c,d").unwrap(),
            Expr::sequence(vec![sym("a"), sym("b"), sym("c"), sym("d")]),
        );
    }

    #[test]
    fn sign_prefixes() {
        assert_eq!(parse("-x").unwrap(), Expr::prefixed(BinaryKind::Subtraction, sym("x")));
        assert_eq!(parse("+x").unwrap(), Expr::prefixed(BinaryKind::Addition, sym("x")));
        assert_eq!(
            parse("2*-3").unwrap(),
            Expr::mul(num(2.0), Expr::prefixed(BinaryKind::Subtraction, num(3.0))),
        );
        assert_eq!(
            parse("-a+b").unwrap(),
            Expr::add(Expr::prefixed(BinaryKind::Subtraction, sym("a")), sym("b")),
        );
        assert_eq!(
            parse("a--b").unwrap(),
            Expr::sub(sym("a"), Expr::prefixed(BinaryKind::Subtraction, sym("b"))),
        );
        assert_eq!(
            parse("-a*b").unwrap(),
            Expr::prefixed(BinaryKind::Subtraction, Expr::mul(sym("a"), sym("b"))),
        );
    }

    #[test]
    fn groups_and_calls() {
        assert_eq!(
            parse("[a+(b)]").unwrap(),
            Expr::bracket(Expr::add(sym("a"), Expr::paren(sym("b")))),
        );
        assert_eq!(
            parse("max(a, 2, X)").unwrap(),
            Expr::call("max", vec![sym("a"), num(2.0), sym("X")]),
        );
        assert_eq!(parse("f()").unwrap(), Expr::call("f", Vec::new()));
        assert_eq!(
            parse("f((a,b))").unwrap(),
            Expr::call("f", vec![Expr::paren(Expr::sequence(vec![sym("a"), sym("b")]))]),
        );
        assert_eq!(
            parse("a v (2)").unwrap(),
            Expr::root(sym("a"), Expr::unary(UnaryKind::Parenthesized, num(2.0))),
        );
    }

    #[test]
    fn symbol_kinds() {
        assert!(matches!(parse("k_2").unwrap(), Expr::Coefficient(_)));
        assert!(matches!(parse("Speed").unwrap(), Expr::UnknownTerm(_)));
    }

    #[test]
    fn empty_operands() {
        for (source, span) in [("2+", 1..2), ("*2", 0..1), ("-", 0..1), ("a,,b", 1..2)] {
            let err = parse(source).unwrap_err();
            assert!(err.error.is::<EmptyOperand>(), "{}", source);
            assert_eq!(err.error.spans, vec![span], "{}", source);
        }
    }

    #[test]
    fn empty_group() {
        let err = parse("2*( )").unwrap_err();
        assert_eq!(
            err.error.downcast_ref::<EmptyGroup>(),
            Some(&EmptyGroup { group: "( )".to_string() }),
        );
        assert_eq!(err.fragment(), "( )");
    }

    #[test]
    fn missing_operator() {
        let err = parse("2 x").unwrap_err();
        assert_eq!(
            err.error.downcast_ref::<MissingOperator>(),
            Some(&MissingOperator { lhs: "2".to_string(), rhs: "x".to_string() }),
        );
        assert_eq!(err.error.spans, vec![0..1, 2..3]);

        assert!(parse("2 (x)").unwrap_err().error.is::<MissingOperator>());
    }

    #[test]
    fn rejected_tokens() {
        let err = parse("x + 2.5").unwrap_err();
        assert_eq!(err.fragment(), "2.5");
        assert!(err.error.is::<DecimalLiteral>());

        let err = parse("x $ y").unwrap_err();
        assert_eq!(
            err.error.downcast_ref::<UnrecognizedToken>(),
            Some(&UnrecognizedToken { lexeme: "$".to_string() }),
        );

        assert!(parse("  ").unwrap_err().error.is::<EmptyExpression>());
    }
}
