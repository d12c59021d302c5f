//! Rounding functions.

unary! {
    "round" Round; f64::round; "Round a number to the nearest integer, away from zero on ties.",
    "ceil" Ceil; f64::ceil; "Round a number up to the nearest integer.",
    "floor" Floor; f64::floor; "Round a number down to the nearest integer.",
    "abs" Abs; f64::abs; "Returns the absolute value.",
}
