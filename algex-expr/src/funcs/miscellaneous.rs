//! Uncategorized functions.

use std::ops::RangeInclusive;
use super::Builtin;

/// Build a function that folds any positive number of arguments into one.
macro_rules! variadic {
    ($($name:literal $upname:ident; $func:path; $doc:literal),* $(,)?) => {
        $(
            #[doc = $doc]
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(args: &[f64]) -> Option<f64> {
                    args.iter().copied().reduce($func)
                }
            }

            impl Builtin for $upname {
                fn name(&self) -> &'static str {
                    $name
                }

                fn arity(&self) -> RangeInclusive<usize> {
                    1..=usize::MAX
                }

                fn eval(&self, args: &[f64]) -> Option<f64> {
                    Self::eval_static(args)
                }
            }
        )*
    };
}

variadic! {
    "min" Min; f64::min; "Returns the minimum of the given values.",
    "max" Max; f64::max; "Returns the maximum of the given values.",
}
