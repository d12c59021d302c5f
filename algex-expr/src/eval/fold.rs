//! Numeric folding of a single node whose children have already been computed.
//!
//! These helpers are shared by tree evaluation and by evaluation over a
//! [`RecordZone`](crate::canon::RecordZone), so both produce identical results.

use crate::funcs::{self, power};
use crate::node::{BinaryKind, BinaryOp, Binary, Expr, NaryKind, UnaryKind};

/// Folds a unary node.
pub fn unary(op: UnaryKind, operand: Expr) -> Expr {
    let Some(n) = operand.as_constant() else {
        return Expr::unary(op, operand);
    };

    match op {
        UnaryKind::Positive | UnaryKind::Parenthesized | UnaryKind::Bracketed => Expr::Constant(n),
        UnaryKind::Negative => Expr::Constant(-n),
        UnaryKind::Inverse => Expr::Constant(n.recip()),
    }
}

/// Folds a binary node. Equalities are never folded.
pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let folded = match (lhs.as_constant(), rhs.as_constant()) {
        (Some(a), Some(b)) => match op.kind {
            BinaryKind::Addition => Some(a + b),
            BinaryKind::Subtraction => Some(a - b),
            BinaryKind::Multiplication => Some(a * b),
            BinaryKind::Division => Some(a / b),
            BinaryKind::Power => Some(a.powf(b)),
            BinaryKind::Root => Some(power::root(a, b)),
            BinaryKind::Equality => None,
        },
        _ => None,
    };

    match folded {
        Some(n) => Expr::Constant(n),
        None => Expr::Binary(Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }),
    }
}

/// Folds an n-ary node.
///
/// The constant children of a sum or product are merged into one accumulated constant; the sum
/// appends it after the symbolic children, the product places it before them. An accumulator
/// equal to the identity of the operation is dropped.
pub fn nary(kind: NaryKind, children: Vec<Expr>) -> Expr {
    let (identity, merge): (f64, fn(f64, f64) -> f64) = match kind {
        NaryKind::Sum => (0.0, |a, b| a + b),
        NaryKind::Product => (1.0, |a, b| a * b),
        NaryKind::Sequence => return Expr::sequence(children),
    };

    let mut acc = identity;
    let mut symbolic = Vec::with_capacity(children.len());
    for child in children {
        match child.as_constant() {
            Some(n) => acc = merge(acc, n),
            None => symbolic.push(child),
        }
    }

    if symbolic.is_empty() {
        return Expr::Constant(acc);
    }

    if acc != identity || acc.is_nan() {
        match kind {
            NaryKind::Product => symbolic.insert(0, Expr::Constant(acc)),
            _ => symbolic.push(Expr::Constant(acc)),
        }
    }
    Expr::nary(kind, symbolic)
}

/// Folds a [`Term`](crate::node::Term).
pub fn term(constant: Expr, coefficient: Expr, unknown: Expr) -> Expr {
    match (constant.as_constant(), coefficient.as_constant(), unknown.as_constant()) {
        (Some(c), Some(a), Some(x)) => Expr::Constant(c * a * x),
        _ => Expr::term(constant, coefficient, unknown),
    }
}

/// Folds a function call. Only builtin functions with an accepted number of constant arguments are
/// folded.
pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    let values = args.iter().map(Expr::as_constant).collect::<Option<Vec<_>>>();
    let folded = values
        .zip(funcs::get(name))
        .filter(|(values, builtin)| {
            let accepted = builtin.arity().contains(&values.len());
            if !accepted {
                log::debug!("`{}` does not take {} argument(s)", name, values.len());
            }
            accepted
        })
        .and_then(|(values, builtin)| builtin.eval(&values));

    match folded {
        Some(n) => Expr::Constant(n),
        None => Expr::call(name, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn sum_appends_accumulator() {
        let folded = nary(NaryKind::Sum, vec![
            Expr::constant(1.0),
            Expr::symbol("a"),
            Expr::constant(2.0),
        ]);
        assert_eq!(folded, Expr::sum(vec![Expr::symbol("a"), Expr::constant(3.0)]));
    }

    #[test]
    fn product_prepends_accumulator() {
        let folded = nary(NaryKind::Product, vec![
            Expr::symbol("a"),
            Expr::constant(2.0),
            Expr::constant(3.0),
        ]);
        assert_eq!(folded, Expr::product(vec![Expr::constant(6.0), Expr::symbol("a")]));
    }

    #[test]
    fn identity_is_dropped() {
        let folded = nary(NaryKind::Product, vec![Expr::constant(1.0), Expr::symbol("a")]);
        assert_eq!(folded, Expr::product(vec![Expr::symbol("a")]));
        assert_eq!(nary(NaryKind::Sum, vec![]), Expr::constant(0.0));
    }

    #[test]
    fn equality_never_folds() {
        let folded = binary(
            BinaryOp::new(BinaryKind::Equality),
            Expr::constant(1.0),
            Expr::constant(1.0),
        );
        assert_eq!(folded, Expr::equality(Expr::constant(1.0), Expr::constant(1.0)));
    }

    #[test]
    fn division_by_zero_is_ieee() {
        let folded = binary(BinaryOp::new(BinaryKind::Division), Expr::constant(1.0), Expr::constant(0.0));
        assert_eq!(folded, Expr::constant(f64::INFINITY));
    }

    #[test]
    fn unknown_call_stays_symbolic() {
        let folded = call("f", vec![Expr::constant(1.0)]);
        assert_eq!(folded, Expr::call("f", vec![Expr::constant(1.0)]));
        assert_eq!(call("abs", vec![Expr::constant(-2.0)]), Expr::constant(2.0));
    }

    #[test]
    fn call_with_wrong_arity_stays_symbolic() {
        let two = vec![Expr::constant(4.0), Expr::constant(2.0)];
        let three = vec![Expr::constant(8.0), Expr::constant(2.0), Expr::constant(1.0)];
        assert_eq!(call("sqrt", two.clone()), Expr::call("sqrt", two.clone()));
        assert_eq!(call("log", three.clone()), Expr::call("log", three));
        assert_eq!(call("min", vec![]), Expr::call("min", vec![]));

        let Some(n) = call("log", two).as_constant() else {
            panic!("log(4, 2) did not fold");
        };
        assert_float_absolute_eq!(n, 2.0);
    }
}
