//! Named mathematical constants that can be published into an
//! [`Environment`](crate::env::Environment).

use std::f64::consts;

/// Euler's number.
pub const E: f64 = consts::E;

/// The golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

pub const PI: f64 = consts::PI;

pub const TAU: f64 = consts::TAU;

/// Returns every named constant, along with its name.
pub fn all() -> [(&'static str, f64); 4] {
    [("e", E), ("phi", PHI), ("pi", PI), ("tau", TAU)]
}
