//! Binding and evaluation of expressions.
//!
//! Evaluation never fails. A symbol resolves to the value bound to it, otherwise to the value its
//! [`SymbolTable`] publishes for its name, otherwise it stays symbolic; a composite node folds to
//! a constant when all of its children do.

pub mod fold;

use crate::env::SymbolTable;
use crate::node::{Expr, Symbol};

/// Resolves symbols while walking an expression, guarding against bindings that reach back to the
/// symbol being resolved.
pub(crate) struct Resolver<'t, T: ?Sized> {
    table: &'t T,

    /// The names currently being resolved, innermost last.
    active: Vec<String>,
}

impl<'t, T: SymbolTable + ?Sized> Resolver<'t, T> {
    pub fn new(table: &'t T) -> Self {
        Self { table, active: Vec::new() }
    }

    /// Returns true if no symbol is currently being resolved.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Returns true if the given name is currently being resolved.
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|active| active == name)
    }

    /// Looks up the value published for `name`.
    pub fn lookup(&self, name: &str) -> Option<Expr> {
        self.table.lookup(name)
    }

    /// Marks `name` as being resolved, until the matching [`Resolver::leave`].
    pub fn enter(&mut self, name: &str) {
        log::trace!("resolving `{}`", name);
        self.active.push(name.to_string());
    }

    /// Unmarks the innermost name being resolved.
    pub fn leave(&mut self) {
        self.active.pop();
    }

    /// Runs `f` with `name` marked as being resolved.
    fn resolving<R>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.enter(name);
        let result = f(self);
        self.leave();
        result
    }

    /// Returns the value a symbol resolves to, if it resolves at all.
    pub fn value_of(&self, symbol: &Symbol) -> Option<Expr> {
        if self.is_active(&symbol.name) {
            log::trace!("`{}` refers to itself, leaving it symbolic", symbol.name);
            return None;
        }

        symbol.bound
            .as_deref()
            .cloned()
            .or_else(|| self.lookup(&symbol.name))
    }

    /// Computes the partially folded form of the expression.
    pub fn compute(&mut self, expr: &Expr) -> Expr {
        match expr {
            Expr::Constant(_) => expr.clone(),
            Expr::Coefficient(symbol) | Expr::UnknownTerm(symbol) => match self.value_of(symbol) {
                Some(value) => self.resolving(&symbol.name, |resolver| resolver.compute(&value)),
                None => expr.clone(),
            },
            Expr::Term(term) => fold::term(
                self.compute(&term.constant),
                self.compute(&term.coefficient),
                self.compute(&term.unknown),
            ),
            Expr::Unary(unary) => fold::unary(unary.op, self.compute(&unary.operand)),
            Expr::Binary(binary) => fold::binary(
                binary.op,
                self.compute(&binary.lhs),
                self.compute(&binary.rhs),
            ),
            Expr::Nary(nary) => fold::nary(
                nary.kind,
                nary.children.iter().map(|child| self.compute(child)).collect(),
            ),
            Expr::Call(call) => fold::call(
                &call.name,
                call.args.iter().map(|arg| self.compute(arg)).collect(),
            ),
        }
    }

    /// Returns a detached copy of the expression with every resolvable symbol replaced by its
    /// (converted) value.
    pub fn converting(&mut self, expr: &Expr) -> Expr {
        if let Some(symbol) = expr.symbol_ref() {
            return match self.value_of(symbol) {
                Some(value) => self.resolving(&symbol.name, |resolver| resolver.converting(&value)),
                None => expr.clone(),
            };
        }

        let mut copy = expr.clone();
        let originals = expr.children();
        for (slot, original) in copy.children_mut().into_iter().zip(originals) {
            *slot = self.converting(original);
        }
        copy
    }
}

/// Sets the binding of every symbol named `name` reachable from `expr`, including symbols inside
/// the values bound to other symbols. Returns the number of symbols updated.
fn bind_all(expr: &mut Expr, name: &str, value: Option<&Expr>) -> usize {
    match expr {
        Expr::Coefficient(symbol) | Expr::UnknownTerm(symbol) => {
            if symbol.name == name {
                symbol.bound = value.cloned().map(Box::new);
                1
            } else if let Some(bound) = symbol.bound.as_deref_mut() {
                bind_all(bound, name, value)
            } else {
                0
            }
        },
        _ => expr.children_mut()
            .into_iter()
            .map(|child| bind_all(child, name, value))
            .sum(),
    }
}

impl Expr {
    /// Binds `value` to every occurrence of the symbol `name` in this expression, then publishes
    /// the binding to `table` so that other expressions can resolve `name` too.
    ///
    /// Each occurrence receives its own copy of `value`. Returns the number of occurrences bound.
    pub fn let_<T>(&mut self, name: &str, value: impl Into<Expr>, table: &mut T) -> usize
    where
        T: SymbolTable + ?Sized,
    {
        let value = value.into();
        let count = bind_all(self, name, Some(&value));
        log::debug!("bound `{}` = {} in {} place(s)", name, value, count);
        table.publish(name, Some(value));
        count
    }

    /// Removes the binding of every occurrence of the symbol `name` in this expression, and removes
    /// `name` from `table`. Returns the number of occurrences unbound.
    pub fn unlet<T>(&mut self, name: &str, table: &mut T) -> usize
    where
        T: SymbolTable + ?Sized,
    {
        let count = bind_all(self, name, None);
        log::debug!("unbound `{}` in {} place(s)", name, count);
        table.publish(name, None);
        count
    }

    /// Computes the partially folded form of this expression.
    ///
    /// Composite nodes fold to a constant when all of their children do; sums and products merge
    /// their constant children. Symbols that resolve to nothing stay symbolic, so this never
    /// fails.
    pub fn compute<T: SymbolTable + ?Sized>(&self, table: &T) -> Expr {
        Resolver::new(table).compute(self)
    }

    /// Returns a new, detached expression in which every resolvable symbol has been replaced by its
    /// value. No arithmetic is folded.
    pub fn converting<T: SymbolTable + ?Sized>(&self, table: &T) -> Expr {
        Resolver::new(table).converting(self)
    }

    /// Computes this expression and returns its value if it folds to a constant.
    pub fn try_to_f64<T: SymbolTable + ?Sized>(&self, table: &T) -> Option<f64> {
        self.compute(table).as_constant()
    }

    /// Computes this expression and returns its value, or `0.0` if it does not fold to a constant.
    ///
    /// Use [`Expr::try_to_f64`] to tell the two cases apart.
    pub fn to_double<T: SymbolTable + ?Sized>(&self, table: &T) -> f64 {
        self.try_to_f64(table).unwrap_or(0.0)
    }
}
