//! Built-in functions that fold numerically when every argument folds to a constant.
//!
//! Each function is implemented as a unit `struct` with an associated `eval_static` method, which
//! can be called directly from Rust code, and an implementation of the [`Builtin`] trait, which is
//! used to evaluate [`Call`](crate::node::Call) nodes by name at runtime.
//!
//! # Example
//!
//! ```
//! use algex_expr::funcs::{self, trigonometry::Sin};
//!
//! assert_eq!(Sin::eval_static(0.0), 0.0);
//!
//! let cos = funcs::get("cos").unwrap();
//! assert_eq!(cos.eval(&[0.0]), Some(1.0));
//! ```

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Builds builtin functions that take exactly one argument.
macro_rules! unary {
    ($($name:literal $upname:ident; $func:expr; $doc:literal),* $(,)?) => {
        $(
            #[doc = $doc]
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(n: f64) -> f64 {
                    // NOTE: the closure call is contained within the macro, so we allow
                    // the clippy::redundant_closure_call lint
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(n)
                }
            }

            impl $crate::funcs::Builtin for $upname {
                fn name(&self) -> &'static str {
                    $name
                }

                fn arity(&self) -> std::ops::RangeInclusive<usize> {
                    1..=1
                }

                fn eval(&self, args: &[f64]) -> Option<f64> {
                    match args {
                        [n] => Some(Self::eval_static(*n)),
                        _ => None,
                    }
                }
            }
        )*
    };
}

pub mod miscellaneous;
pub mod power;
pub mod round;
pub mod trigonometry;

/// A trait implemented by all builtin functions.
pub trait Builtin: std::fmt::Debug + Send + Sync {
    /// Returns the name of the function.
    // NOTE: this is a `&self` method and not an associated constant to make the trait object-safe
    fn name(&self) -> &'static str;

    /// The accepted numbers of arguments. A call with any other number of arguments is not
    /// folded.
    fn arity(&self) -> RangeInclusive<usize>;

    /// Evaluates the function, returning [`None`] if the number of arguments is not accepted.
    fn eval(&self, args: &[f64]) -> Option<f64>;
}

static BUILTINS: Lazy<HashMap<&'static str, Box<dyn Builtin>>> = Lazy::new(|| {
    use miscellaneous::*;
    use power::*;
    use round::*;
    use trigonometry::*;

    macro_rules! build {
        ($($upname:ident),* $(,)?) => {
            [
                $(
                    Box::new($upname) as Box<dyn Builtin>,
                )*
            ]
                .into_iter()
                .map(|builtin| (builtin.name(), builtin))
                .collect()
        };
    }

    build! {
        Sin, Cos, Tan, Asin, Acos, Atan, Sinh, Cosh, Tanh,
        Sqrt, Cbrt, Exp, Ln, Log,
        Abs, Floor, Ceil, Round,
        Min, Max,
    }
});

/// Returns the builtin function with the given name.
pub fn get(name: &str) -> Option<&'static dyn Builtin> {
    BUILTINS.get(name).map(|builtin| builtin.as_ref())
}

/// Returns the names of all builtin functions, in alphabetical order.
pub fn names() -> Vec<&'static str> {
    let mut names = BUILTINS.keys().copied().collect::<Vec<_>>();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_is_complete() {
        assert_eq!(names(), vec![
            "abs", "acos", "asin", "atan", "cbrt", "ceil", "cos", "cosh", "exp", "floor", "ln",
            "log", "max", "min", "round", "sin", "sinh", "sqrt", "tan", "tanh",
        ]);
    }

    #[test]
    fn eval_by_name() {
        assert_float_absolute_eq!(get("sin").unwrap().eval(&[std::f64::consts::FRAC_PI_2]).unwrap(), 1.0);
        assert_float_absolute_eq!(get("log").unwrap().eval(&[1000.0]).unwrap(), 3.0);
        assert_float_absolute_eq!(get("log").unwrap().eval(&[8.0, 2.0]).unwrap(), 3.0);
        assert_eq!(get("max").unwrap().eval(&[1.0, 7.0, 3.0]), Some(7.0));
    }

    #[test]
    fn wrong_arity() {
        assert_eq!(get("sqrt").unwrap().eval(&[]), None);
        assert_eq!(get("log").unwrap().eval(&[1.0, 2.0, 3.0]), None);
        assert_eq!(get("min").unwrap().eval(&[]), None);
        assert!(get("nope").is_none());
    }
}
