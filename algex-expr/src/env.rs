use crate::{consts, funcs, node::Expr};
use levenshtein::levenshtein;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The channel through which one expression publishes the values bound to its symbols, and
/// through which another expression resolves symbols it has no binding for.
///
/// [`Expr::let_`] calls [`SymbolTable::publish`] with the bound value, and [`Expr::unlet`] calls
/// it with [`None`]. Evaluation calls [`SymbolTable::lookup`] for every symbol without a binding of
/// its own.
///
/// [`SymbolTable`] is also implemented for the unit type `()`, which shares nothing. A
/// [`SymbolTable`] has no internal synchronization; sharing one between threads requires external
/// locking.
pub trait SymbolTable {
    /// Publishes a binding of `name`, or its removal if `value` is [`None`].
    fn publish(&mut self, name: &str, value: Option<Expr>);

    /// Looks up the value published for `name`.
    fn lookup(&self, name: &str) -> Option<Expr>;
}

impl SymbolTable for () {
    #[inline]
    fn publish(&mut self, _: &str, _: Option<Expr>) {}

    #[inline]
    fn lookup(&self, _: &str) -> Option<Expr> {
        None
    }
}

impl<T: SymbolTable + ?Sized> SymbolTable for &mut T {
    fn publish(&mut self, name: &str, value: Option<Expr>) {
        (**self).publish(name, value);
    }

    fn lookup(&self, name: &str) -> Option<Expr> {
        (**self).lookup(name)
    }
}

/// A [`SymbolTable`] made of two decoupled hooks: a publish notification and a lookup function.
///
/// ```
/// use algex_expr::{env::Hooks, Expr};
/// use std::{cell::RefCell, collections::HashMap};
///
/// let published = RefCell::new(HashMap::new());
/// let mut hooks = Hooks::new(
///     |name: &str, value: Option<Expr>| match value {
///         Some(value) => { published.borrow_mut().insert(name.to_string(), value); },
///         None => { published.borrow_mut().remove(name); },
///     },
///     |name: &str| published.borrow().get(name).cloned(),
/// );
///
/// let mut a = Expr::symbol("a");
/// a.let_("a", 2.0, &mut hooks);
///
/// let b = Expr::add(Expr::symbol("a"), Expr::constant(1.0));
/// assert_eq!(b.to_double(&hooks), 3.0);
/// ```
pub struct Hooks<P, L> {
    publish: P,
    lookup: L,
}

impl<P, L> Hooks<P, L>
where
    P: FnMut(&str, Option<Expr>),
    L: Fn(&str) -> Option<Expr>,
{
    /// Creates a symbol table from a publish hook and a lookup hook.
    pub fn new(publish: P, lookup: L) -> Self {
        Self { publish, lookup }
    }
}

impl<P, L> SymbolTable for Hooks<P, L>
where
    P: FnMut(&str, Option<Expr>),
    L: Fn(&str) -> Option<Expr>,
{
    fn publish(&mut self, name: &str, value: Option<Expr>) {
        (self.publish)(name, value);
    }

    fn lookup(&self, name: &str) -> Option<Expr> {
        (self.lookup)(name)
    }
}

/// An explicit environment of named values shared between expressions.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Environment {
    /// The variables in the environment.
    vars: HashMap<String, Expr>,
}

impl Environment {
    /// Creates a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment containing the named constants `e`, `phi`, `pi` and `tau`.
    pub fn with_constants() -> Self {
        Self {
            vars: consts::all()
                .into_iter()
                .map(|(name, value)| (name.to_string(), Expr::Constant(value)))
                .collect(),
        }
    }

    /// Add a variable to the environment.
    pub fn add_var(&mut self, name: &str, value: impl Into<Expr>) {
        self.vars.insert(name.to_string(), value.into());
    }

    /// Get the value of a variable in the environment.
    pub fn get_var(&self, name: &str) -> Option<&Expr> {
        self.vars.get(name)
    }

    /// Removes a variable from the environment, returning its value.
    pub fn remove_var(&mut self, name: &str) -> Option<Expr> {
        self.vars.remove(name)
    }

    /// Returns the variables in the environment.
    pub fn vars(&self) -> &HashMap<String, Expr> {
        &self.vars
    }

    /// Returns the variables in the environment, sorted by name.
    pub fn sorted_vars(&self) -> Vec<(&str, &Expr)> {
        let mut vars = self.vars
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect::<Vec<_>>();
        vars.sort_unstable_by_key(|(name, _)| *name);
        vars
    }

    /// Returns all variables and builtin functions with a name similar to the given name, sorted.
    pub fn similar_names(&self, name: &str) -> Vec<&str> {
        let mut similar = self.vars
            .keys()
            .map(String::as_str)
            .chain(funcs::names())
            .filter(|n| *n != name && levenshtein(n, name) < 2)
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar.dedup();
        similar
    }
}

impl SymbolTable for Environment {
    fn publish(&mut self, name: &str, value: Option<Expr>) {
        match value {
            Some(value) => {
                log::trace!("publishing `{}` = {}", name, value);
                self.vars.insert(name.to_string(), value);
            },
            None => {
                log::trace!("unpublishing `{}`", name);
                self.vars.remove(name);
            },
        }
    }

    fn lookup(&self, name: &str) -> Option<Expr> {
        self.vars.get(name).cloned()
    }
}
