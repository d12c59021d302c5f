//! The expression tree.
//!
//! An [`Expr`] is a closed set of node kinds: numeric and symbolic leaves, unary wrappers, binary
//! operations, ordered n-ary lists and function calls. Every composite owns its children, so
//! [`Clone`] is always a deep copy; a tree that is used as a prototype by many callers can be
//! cloned and bound freely without the prototype ever observing the binding.
//!
//! Symbolic leaves ([`Expr::Coefficient`] and [`Expr::UnknownTerm`]) carry a [`Symbol`], which
//! can be bound to a value in place with [`Expr::let_`](crate::eval). The same name may appear in
//! many leaves; binding through [`Expr::let_`] visits all of them, while binding a single
//! [`Symbol`] by hand only affects that leaf.

mod iter;

pub use iter::ExprIter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The binding strength of an expression, from weakest (applied last, closest to the root of the
/// tree) to strongest.
///
/// The ordering matches the operator levels of the textual grammar, and is used to decide where
/// grouping marks are needed when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// `=`
    Equality,

    /// `,`
    Sequence,

    /// `+`
    Addition,

    /// `-`
    Subtraction,

    /// `/`
    Division,

    /// `*`
    Multiplication,

    /// `^`
    Power,

    /// `v`
    Root,

    /// Anything that never needs grouping: names, non-negative numbers, calls and unary nodes.
    Atom,
}

/// A named symbol, optionally bound to a value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Symbol {
    /// The name of the symbol.
    pub name: String,

    /// The value bound to this symbol, if any.
    pub bound: Option<Box<Expr>>,
}

impl Symbol {
    /// Creates a new unbound symbol.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), bound: None }
    }

    /// Returns true if a value is bound to this symbol.
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Binds a value to this symbol, replacing any previous value.
    pub fn bind(&mut self, value: Expr) {
        self.bound = Some(Box::new(value));
    }

    /// Removes the value bound to this symbol.
    pub fn unbind(&mut self) {
        self.bound = None;
    }
}

/// Returns true if the name is spelled like a coefficient: only lowercase ASCII letters, digits,
/// and underscores.
pub fn is_coefficient_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// The kind of a unary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryKind {
    Positive,
    Negative,
    Inverse,
    Parenthesized,
    Bracketed,
}

impl UnaryKind {
    /// The one-character operator tag of this kind.
    pub fn tag(self) -> char {
        match self {
            Self::Positive => '+',
            Self::Negative => '-',
            Self::Inverse => '/',
            Self::Parenthesized => '(',
            Self::Bracketed => '[',
        }
    }

    /// Returns true for the two grouping kinds, which are arithmetically transparent.
    pub fn is_grouping(self) -> bool {
        matches!(self, Self::Parenthesized | Self::Bracketed)
    }
}

/// The kind of a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Power,

    /// `A v B`, the `B`-th root of `A`.
    Root,

    Equality,
}

impl BinaryKind {
    /// The one-character operator tag of this kind.
    pub fn tag(self) -> char {
        match self {
            Self::Addition => '+',
            Self::Subtraction => '-',
            Self::Multiplication => '*',
            Self::Division => '/',
            Self::Power => '^',
            Self::Root => 'v',
            Self::Equality => '=',
        }
    }

    /// The binding strength of this kind.
    pub fn level(self) -> Level {
        match self {
            Self::Addition => Level::Addition,
            Self::Subtraction => Level::Subtraction,
            Self::Multiplication => Level::Multiplication,
            Self::Division => Level::Division,
            Self::Power => Level::Power,
            Self::Root => Level::Root,
            Self::Equality => Level::Equality,
        }
    }
}

/// The operator of a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryOp {
    /// The kind of binary operation.
    pub kind: BinaryKind,

    /// Whether the left operand (always the constant `0`) was implicitly inserted for a sign
    /// prefix, as in `-x`. Only meaningful for [`BinaryKind::Addition`] and
    /// [`BinaryKind::Subtraction`].
    pub implicit: bool,
}

impl BinaryOp {
    /// Creates an explicit binary operator.
    pub fn new(kind: BinaryKind) -> Self {
        Self { kind, implicit: false }
    }
}

/// The kind of an n-ary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NaryKind {
    Sum,
    Product,
    Sequence,
}

impl NaryKind {
    /// The one-character operator tag of this kind.
    pub fn tag(self) -> char {
        match self {
            Self::Sum => '+',
            Self::Product => '*',
            Self::Sequence => ',',
        }
    }

    /// The binding strength of this kind.
    pub fn level(self) -> Level {
        match self {
            Self::Sum => Level::Addition,
            Self::Product => Level::Multiplication,
            Self::Sequence => Level::Sequence,
        }
    }
}

/// The legacy three-slot product `constant * coefficient * unknown`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    pub constant: Box<Expr>,
    pub coefficient: Box<Expr>,
    pub unknown: Box<Expr>,
}

/// A node wrapping exactly one operand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    pub op: UnaryKind,
    pub operand: Box<Expr>,
}

/// A node with exactly two operands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    pub op: BinaryOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

/// A node with an ordered list of children.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Nary {
    pub kind: NaryKind,
    pub children: Vec<Expr>,
}

/// A function call, such as `f(x, y)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function.
    pub name: String,

    /// The ordered parameter sequence.
    pub args: Vec<Expr>,
}

/// An algebraic expression.
///
/// The [`PartialEq`] implementation is structural: two expressions are equal if they have the
/// same shape, the same payloads, and the same bindings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number, such as `2`.
    Constant(f64),

    /// A lowercase-named symbolic parameter, such as `a` or `k_2`.
    Coefficient(Symbol),

    /// A symbolic variable whose name is not all lowercase, such as `X`.
    UnknownTerm(Symbol),

    /// The legacy `constant * coefficient * unknown` product.
    Term(Term),

    /// A unary node, such as `-(x)` or `(x)`.
    Unary(Unary),

    /// A binary node, such as `a + b`.
    Binary(Binary),

    /// An n-ary node, such as a sum of many terms.
    Nary(Nary),

    /// A function call, such as `sin(x)`.
    Call(Call),
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::Constant(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::Constant(n as f64)
    }
}

impl Expr {
    /// Creates a [`Expr::Constant`].
    pub fn constant(n: f64) -> Self {
        Expr::Constant(n)
    }

    /// Creates an unbound [`Expr::Coefficient`].
    pub fn coefficient(name: impl Into<String>) -> Self {
        Expr::Coefficient(Symbol::new(name))
    }

    /// Creates an unbound [`Expr::UnknownTerm`].
    pub fn unknown(name: impl Into<String>) -> Self {
        Expr::UnknownTerm(Symbol::new(name))
    }

    /// Creates a coefficient or an unknown term, depending on how the name is spelled (see
    /// [`is_coefficient_name`]).
    pub fn symbol(name: impl Into<String>) -> Self {
        let name = name.into();
        if is_coefficient_name(&name) {
            Self::coefficient(name)
        } else {
            Self::unknown(name)
        }
    }

    /// Creates a [`Expr::Term`].
    pub fn term(constant: Expr, coefficient: Expr, unknown: Expr) -> Self {
        Expr::Term(Term {
            constant: Box::new(constant),
            coefficient: Box::new(coefficient),
            unknown: Box::new(unknown),
        })
    }

    /// Creates a unary node.
    pub fn unary(op: UnaryKind, operand: Expr) -> Self {
        Expr::Unary(Unary { op, operand: Box::new(operand) })
    }

    pub fn positive(operand: Expr) -> Self {
        Self::unary(UnaryKind::Positive, operand)
    }

    pub fn negative(operand: Expr) -> Self {
        Self::unary(UnaryKind::Negative, operand)
    }

    pub fn inverse(operand: Expr) -> Self {
        Self::unary(UnaryKind::Inverse, operand)
    }

    pub fn paren(operand: Expr) -> Self {
        Self::unary(UnaryKind::Parenthesized, operand)
    }

    pub fn bracket(operand: Expr) -> Self {
        Self::unary(UnaryKind::Bracketed, operand)
    }

    /// Creates an explicit binary node.
    pub fn binary(kind: BinaryKind, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(Binary {
            op: BinaryOp::new(kind),
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// Creates a sign prefix, such as `-x`: a binary node whose left operand is an implicit `0`.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is not [`BinaryKind::Addition`] or [`BinaryKind::Subtraction`].
    pub fn prefixed(kind: BinaryKind, operand: Expr) -> Self {
        assert!(
            matches!(kind, BinaryKind::Addition | BinaryKind::Subtraction),
            "only `+` and `-` can be used as a sign prefix",
        );
        Expr::Binary(Binary {
            op: BinaryOp { kind, implicit: true },
            lhs: Box::new(Expr::Constant(0.0)),
            rhs: Box::new(operand),
        })
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryKind::Addition, lhs, rhs)
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryKind::Subtraction, lhs, rhs)
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryKind::Multiplication, lhs, rhs)
    }

    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryKind::Division, lhs, rhs)
    }

    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Self::binary(BinaryKind::Power, base, exponent)
    }

    /// Creates `radicand v degree`, the `degree`-th root of `radicand`.
    pub fn root(radicand: Expr, degree: Expr) -> Self {
        Self::binary(BinaryKind::Root, radicand, degree)
    }

    pub fn equality(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryKind::Equality, lhs, rhs)
    }

    /// Creates an n-ary node.
    pub fn nary(kind: NaryKind, children: Vec<Expr>) -> Self {
        Expr::Nary(Nary { kind, children })
    }

    pub fn sum(children: Vec<Expr>) -> Self {
        Self::nary(NaryKind::Sum, children)
    }

    pub fn product(children: Vec<Expr>) -> Self {
        Self::nary(NaryKind::Product, children)
    }

    pub fn sequence(children: Vec<Expr>) -> Self {
        Self::nary(NaryKind::Sequence, children)
    }

    /// Creates a function call.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call(Call { name: name.into(), args })
    }

    /// Returns the value of this expression if it is a [`Expr::Constant`].
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Expr::Constant(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the symbol of this expression if it is a [`Expr::Coefficient`] or
    /// [`Expr::UnknownTerm`].
    pub fn symbol_ref(&self) -> Option<&Symbol> {
        match self {
            Expr::Coefficient(symbol) | Expr::UnknownTerm(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Returns true if this expression is a leaf: a constant, a named symbol, or a [`Term`].
    pub fn is_atomic(&self) -> bool {
        matches!(self, Expr::Constant(_) | Expr::Coefficient(_) | Expr::UnknownTerm(_) | Expr::Term(_))
    }

    /// Returns true if this expression is a sign prefix, such as `-x`.
    pub fn is_sign_prefix(&self) -> bool {
        matches!(self, Expr::Binary(Binary { op: BinaryOp { implicit: true, .. }, .. }))
    }

    /// Returns the binding strength of this expression.
    pub fn level(&self) -> Level {
        match self {
            // a negative number reads like a subtraction
            Expr::Constant(n) if *n < 0.0 => Level::Subtraction,
            Expr::Constant(_)
                | Expr::Coefficient(_)
                | Expr::UnknownTerm(_)
                | Expr::Unary(_)
                | Expr::Call(_) => Level::Atom,
            Expr::Term(_) => Level::Multiplication,
            Expr::Binary(binary) => binary.op.kind.level(),
            Expr::Nary(nary) => nary.kind.level(),
        }
    }

    /// If this expression is a [`UnaryKind::Parenthesized`] node, returns the innermost expression
    /// inside the parentheses. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Unary(Unary { op: UnaryKind::Parenthesized, operand }) = inner {
            inner = operand;
        }
        inner
    }

    /// Returns the direct children of this expression, in order.
    ///
    /// Values bound to symbols are not children.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Constant(_) | Expr::Coefficient(_) | Expr::UnknownTerm(_) => Vec::new(),
            Expr::Term(term) => vec![
                term.constant.as_ref(),
                term.coefficient.as_ref(),
                term.unknown.as_ref(),
            ],
            Expr::Unary(unary) => vec![unary.operand.as_ref()],
            Expr::Binary(binary) => vec![binary.lhs.as_ref(), binary.rhs.as_ref()],
            Expr::Nary(nary) => nary.children.iter().collect(),
            Expr::Call(call) => call.args.iter().collect(),
        }
    }

    /// Returns mutable references to the direct children of this expression, in order.
    pub fn children_mut(&mut self) -> Vec<&mut Expr> {
        match self {
            Expr::Constant(_) | Expr::Coefficient(_) | Expr::UnknownTerm(_) => Vec::new(),
            Expr::Term(term) => vec![
                term.constant.as_mut(),
                term.coefficient.as_mut(),
                term.unknown.as_mut(),
            ],
            Expr::Unary(unary) => vec![unary.operand.as_mut()],
            Expr::Binary(binary) => vec![binary.lhs.as_mut(), binary.rhs.as_mut()],
            Expr::Nary(nary) => nary.children.iter_mut().collect(),
            Expr::Call(call) => call.args.iter_mut().collect(),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the number of nodes in the tree, not counting bound values.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Returns the distinct symbol names used in the tree, in order of first appearance.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for symbol in self.post_order_iter().filter_map(Expr::symbol_ref) {
            if !names.contains(&symbol.name.as_str()) {
                names.push(symbol.name.as_str());
            }
        }
        names
    }

    /// Returns true if a symbol with the given name is reachable from this expression, including
    /// through values bound to other symbols.
    pub fn contains_name(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| match expr.symbol_ref() {
            Some(symbol) => symbol.name == name
                || symbol.bound.as_ref().map_or(false, |bound| bound.contains_name(name)),
            None => false,
        })
    }
}
