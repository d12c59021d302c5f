//! General trigonometric and hyperbolic trigonometric functions. Angles are in radians.

unary! {
    "sin" Sin; f64::sin; "The sine function, `sin(x)`.",
    "cos" Cos; f64::cos; "The cosine function, `cos(x)`.",
    "tan" Tan; f64::tan; "The tangent function, `tan(x)`.",
    "asin" Asin; f64::asin; "The inverse sine function, `asin(x)`.",
    "acos" Acos; f64::acos; "The inverse cosine function, `acos(x)`.",
    "atan" Atan; f64::atan; "The inverse tangent function, `atan(x)`.",
    "sinh" Sinh; f64::sinh; "The hyperbolic sine function, `sinh(x)`.",
    "cosh" Cosh; f64::cosh; "The hyperbolic cosine function, `cosh(x)`.",
    "tanh" Tanh; f64::tanh; "The hyperbolic tangent function, `tanh(x)`.",
}
