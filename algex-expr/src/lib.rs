//! The expression model of `algex`: expression trees, their textual and TeX renderings, symbol
//! binding and partial evaluation, and hash-consing of structurally equal subexpressions.
//!
//! Expressions are usually produced by `algex-parser`, but can also be built directly:
//!
//! ```
//! use algex_expr::{env::Environment, fmt::Latex, Expr};
//!
//! // b * x ^ 2
//! let mut expr = Expr::mul(Expr::symbol("b"), Expr::pow(Expr::symbol("x"), Expr::constant(2.0)));
//! assert_eq!(expr.to_string(), "b*x^2");
//! assert_eq!(expr.to_tex(), "b \\cdot {x}^{2}");
//!
//! let mut env = Environment::new();
//! expr.let_("b", 2.0, &mut env);
//! expr.let_("x", 5.0, &mut env);
//! assert_eq!(expr.to_double(&env), 50.0);
//!
//! let formula = expr.make_unique().unwrap();
//! assert_eq!(formula.to_double(&env), 50.0);
//! ```

pub mod canon;
pub mod consts;
pub mod env;
pub mod eval;
pub mod fmt;
pub mod funcs;
pub mod node;

pub use canon::{CanonError, Formula, NodeId, RecordZone};
pub use env::{Environment, SymbolTable};
pub use fmt::Latex;
pub use node::{Expr, Level, Symbol};
