//! Parser for the `algex` expression grammar.
//!
//! The grammar has eight binary operator levels, from the weakest to the strongest: `=`, `,`,
//! `+`, `-`, `/`, `*`, `^` and `v` (`A v B` is the `B`-th root of `A`). Note that `/` binds more
//! weakly than `*`, so `a/b*c` is `a/(b*c)`. Operators of the same level fold to the left.
//!
//! Parentheses and brackets group, names followed by parentheses are function calls, and a `+`
//! or `-` with no left operand is a sign prefix. Only integer literals are accepted.
//!
//! ```
//! use algex_expr::{Environment, Latex};
//! use algex_parser::parse;
//!
//! let mut expr = parse("b*x^2").unwrap();
//! assert_eq!(expr.to_tex(), "b \\cdot {x}^{2}");
//!
//! let mut env = Environment::new();
//! expr.let_("b", 2, &mut env);
//! expr.let_("x", 5, &mut env);
//! assert_eq!(expr.to_double(&env), 50.0);
//! ```

pub mod parser;
pub mod tokenizer;

pub use parser::{parse, ParseError, Parser};
