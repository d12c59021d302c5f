//! Functions related to powers, exponentiation, and roots.

use std::ops::RangeInclusive;
use super::Builtin;

unary! {
    "exp" Exp; f64::exp; "The exponential function, `e ^ x`.",
    "ln" Ln; f64::ln; "The natural logarithm, `ln(x)`.",
    "sqrt" Sqrt; f64::sqrt; "The square root function, `sqrt(x)`.",
    "cbrt" Cbrt; f64::cbrt; "The real cube root function, `cbrt(x)`.",
}

/// The logarithm function to an arbitrary base, `log(x, base = 10)`.
#[derive(Debug)]
pub struct Log;

impl Log {
    pub fn eval_static(n: f64, base: Option<f64>) -> f64 {
        match base {
            Some(base) => n.ln() / base.ln(),
            None => n.log10(),
        }
    }
}

impl Builtin for Log {
    fn name(&self) -> &'static str {
        "log"
    }

    fn arity(&self) -> RangeInclusive<usize> {
        1..=2
    }

    fn eval(&self, args: &[f64]) -> Option<f64> {
        match args {
            [n] => Some(Self::eval_static(*n, None)),
            [n, base] => Some(Self::eval_static(*n, Some(*base))),
            _ => None,
        }
    }
}

/// Returns `a ^ (1 / b)`, the `b`-th root of `a`, as computed by the `v` operator.
///
/// An odd integer degree of a negative radicand gives the negative real root, so `-8 v 3` is `-2`
/// rather than `NaN`.
pub fn root(a: f64, b: f64) -> f64 {
    let odd_degree = b.fract() == 0.0 && b % 2.0 != 0.0;
    if a < 0.0 && odd_degree {
        -(-a).powf(b.recip())
    } else {
        a.powf(b.recip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn odd_root_of_negative() {
        assert_float_absolute_eq!(root(-8.0, 3.0), -2.0);
        assert_float_absolute_eq!(root(16.0, 4.0), 2.0);
        assert!(root(-4.0, 2.0).is_nan());
    }

    #[test]
    fn log_default_base() {
        assert_float_absolute_eq!(Log::eval_static(100.0, None), 2.0);
        assert_float_absolute_eq!(Log::eval_static(std::f64::consts::E, Some(std::f64::consts::E)), 1.0);
    }
}
