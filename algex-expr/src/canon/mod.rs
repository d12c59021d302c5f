//! Hash-consing of expressions.
//!
//! A [`RecordZone`] stores every structurally distinct subexpression of the expressions inserted
//! into it exactly once, as a [`Record`] whose children are the [`NodeId`]s of other records. An
//! expression tree becomes a DAG: two equal subtrees of the tree become the same node of the zone.
//!
//! Nodes are interned children first, so the children of a new node are always canonical, and
//! the [`Weight`] of a node can compare its children by id. A new node is looked up by its
//! structural hash, and then compared exactly with the node registered under that hash; if the
//! hashes are equal but the contents are not, the insertion fails with
//! [`CanonError::HashCollision`] rather than silently merging the two.
//!
//! Symbols are unified by name, so binding a symbol in a zone binds every occurrence of it at
//! once. The exception is an occurrence inside the value bound to a symbol of the same name (the
//! inner `x` of `x` bound to `x+1`), which is a separate, shadowed node that stays symbolic. A zone requires exclusive access while nodes are inserted or bound; build it fully
//! before sharing it between threads.

mod error;
mod eval;
mod record;
mod weight;

use crate::env::SymbolTable;
use crate::fmt::Latex;
use crate::node::{Expr, Symbol};
use eval::ZoneEval;
use std::collections::{hash_map::DefaultHasher, HashMap, HashSet};
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault};

pub use error::CanonError;
pub use record::{NodeId, Record};
pub use weight::{KindTag, Payload, Weight};

/// The default hasher of a [`RecordZone`]. It is deterministic, so the structural hash of a
/// subexpression is the same in every zone.
pub type DefaultBuildHasher = BuildHasherDefault<DefaultHasher>;

/// How symbols are interned while inserting an expression.
#[derive(Debug, Default)]
struct Scope {
    /// The names whose bound values are being inserted, innermost last.
    binding: Vec<String>,

    /// Whether an unbound symbol takes the zone's symbol of the same name, along with its binding.
    adopt: bool,
}

impl Scope {
    /// Returns true if a symbol named `name` is shadowed here.
    fn shadows(&self, name: &str) -> bool {
        self.binding.iter().any(|binding| binding == name)
    }
}

/// The canonical registry of one canonicalization run.
#[derive(Debug, Clone)]
pub struct RecordZone<S = DefaultBuildHasher> {
    /// The canonical records, indexed by [`NodeId`].
    records: Vec<Record>,

    /// The weight of each record, indexed by [`NodeId`].
    weights: Vec<Weight>,

    /// Maps the structural hash of each record to its id.
    table: HashMap<u64, NodeId>,

    /// Builds the hasher used for structural hashes.
    hasher: S,
}

impl Default for RecordZone {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordZone {
    /// Creates an empty zone using the [`DefaultBuildHasher`].
    pub fn new() -> Self {
        Self::with_hasher(DefaultBuildHasher::default())
    }
}

impl<S: BuildHasher> RecordZone<S> {
    /// Creates an empty zone that computes structural hashes with the given hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            records: Vec::new(),
            weights: Vec::new(),
            table: HashMap::new(),
            hasher,
        }
    }

    /// Returns the number of canonical nodes in the zone.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the zone has no nodes.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record of the given node, or [`None`] if the id does not belong to this zone.
    pub fn get(&self, id: NodeId) -> Option<&Record> {
        self.records.get(id.index())
    }

    /// Returns the weight of the given node, or [`None`] if the id does not belong to this zone.
    pub fn weight(&self, id: NodeId) -> Option<&Weight> {
        self.weights.get(id.index())
    }

    /// Returns an iterator over the canonical nodes, in the order they were interned. Children
    /// always come before their parents.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Record)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (NodeId(index as u32), record))
    }

    /// Returns an error if the record refers to a node outside of this zone.
    fn check(&self, record: &Record) -> Result<(), CanonError> {
        match record
            .children()
            .iter()
            .copied()
            .chain(record.bound())
            .find(|id| id.index() >= self.records.len())
        {
            Some(id) => Err(CanonError::UnknownNode { id }),
            None => Ok(()),
        }
    }

    /// Computes the weight of a record whose references are all valid.
    fn weigh(&self, record: &Record) -> Weight {
        Weight::of(
            record,
            |id| self.weights[id.index()].hash(),
            self.hasher.build_hasher(),
        )
    }

    /// Looks up the node registered with the same weight as the given one.
    ///
    /// Returns an error if a node with different content is registered under the same hash.
    fn lookup(&self, weight: &Weight) -> Result<Option<NodeId>, CanonError> {
        match self.table.get(&weight.hash()) {
            Some(&existing) if self.weights[existing.index()] == *weight => Ok(Some(existing)),
            Some(&existing) => Err(CanonError::HashCollision {
                hash: weight.hash(),
                existing,
            }),
            None => Ok(None),
        }
    }

    /// Interns a record whose children are nodes of this zone, returning the id of the canonical
    /// node with the same content.
    ///
    /// A symbol record is unified with the existing symbol of the same name, which must have the
    /// same binding.
    pub fn intern(&mut self, record: Record) -> Result<NodeId, CanonError> {
        self.intern_with(record, false)
    }

    /// Interns a record. If `adopt` is true, an unbound symbol record is unified with the existing
    /// symbol of the same name whatever its binding.
    fn intern_with(&mut self, record: Record, adopt: bool) -> Result<NodeId, CanonError> {
        self.check(&record)?;
        let weight = self.weigh(&record);

        if let Some(existing) = self.lookup(&weight)? {
            let bound = self.records[existing.index()].bound();
            if bound != record.bound() && !(adopt && record.bound().is_none()) {
                return Err(CanonError::ConflictingBinding {
                    name: record.name().unwrap_or_default().to_string(),
                });
            }

            log::trace!("reusing {} for {:?}", existing, weight.kind());
            return Ok(existing);
        }

        let id = NodeId(self.records.len() as u32);
        log::trace!("interning {} as {:?} with hash {:#018x}", id, weight.kind(), weight.hash());
        self.table.insert(weight.hash(), id);
        self.records.push(record);
        self.weights.push(weight);
        Ok(id)
    }

    /// Inserts every subexpression of the expression into the zone, children first, and returns
    /// the id of the canonical node of the whole expression.
    ///
    /// Values bound to symbols are inserted before the symbols themselves. A symbol inside the
    /// value bound to a symbol of the same name is inserted as a shadowed symbol (see
    /// [`Record::is_shadowed`]).
    pub fn insert(&mut self, expr: &Expr) -> Result<NodeId, CanonError> {
        self.insert_in(expr, &mut Scope::default())
    }

    fn insert_in(&mut self, expr: &Expr, scope: &mut Scope) -> Result<NodeId, CanonError> {
        let record = match expr {
            Expr::Constant(n) => Record::Constant(*n),
            Expr::Coefficient(symbol) => {
                let (bound, shadowed) = self.insert_symbol(symbol, scope)?;
                Record::Coefficient { name: symbol.name.clone(), bound, shadowed }
            },
            Expr::UnknownTerm(symbol) => {
                let (bound, shadowed) = self.insert_symbol(symbol, scope)?;
                Record::UnknownTerm { name: symbol.name.clone(), bound, shadowed }
            },
            Expr::Term(term) => Record::Term([
                self.insert_in(&term.constant, scope)?,
                self.insert_in(&term.coefficient, scope)?,
                self.insert_in(&term.unknown, scope)?,
            ]),
            Expr::Unary(unary) => Record::Unary(unary.op, self.insert_in(&unary.operand, scope)?),
            Expr::Binary(binary) => Record::Binary(
                binary.op,
                [self.insert_in(&binary.lhs, scope)?, self.insert_in(&binary.rhs, scope)?],
            ),
            Expr::Nary(nary) => Record::Nary(
                nary.kind,
                nary.children
                    .iter()
                    .map(|child| self.insert_in(child, scope))
                    .collect::<Result<_, _>>()?,
            ),
            Expr::Call(call) => Record::Call(
                call.name.clone(),
                call.args
                    .iter()
                    .map(|arg| self.insert_in(arg, scope))
                    .collect::<Result<_, _>>()?,
            ),
        };

        self.intern_with(record, scope.adopt)
    }

    /// Inserts the value bound to the symbol, returning its id and whether the symbol is shadowed.
    fn insert_symbol(
        &mut self,
        symbol: &Symbol,
        scope: &mut Scope,
    ) -> Result<(Option<NodeId>, bool), CanonError> {
        let shadowed = scope.shadows(&symbol.name);
        let Some(value) = symbol.bound.as_deref() else {
            return Ok((None, shadowed));
        };

        scope.binding.push(symbol.name.clone());
        let bound = self.insert_in(value, scope);
        scope.binding.pop();
        Ok((Some(bound?), shadowed))
    }

    /// Returns the id of the canonical node structurally equal to the expression, without
    /// inserting anything.
    pub fn find(&self, expr: &Expr) -> Option<NodeId> {
        self.find_in(expr, &mut Scope::default())
    }

    fn find_in(&self, expr: &Expr, scope: &mut Scope) -> Option<NodeId> {
        let record = match expr {
            Expr::Constant(n) => Record::Constant(*n),
            Expr::Coefficient(symbol) => {
                let (bound, shadowed) = self.find_symbol(symbol, scope)?;
                Record::Coefficient { name: symbol.name.clone(), bound, shadowed }
            },
            Expr::UnknownTerm(symbol) => {
                let (bound, shadowed) = self.find_symbol(symbol, scope)?;
                Record::UnknownTerm { name: symbol.name.clone(), bound, shadowed }
            },
            Expr::Term(term) => Record::Term([
                self.find_in(&term.constant, scope)?,
                self.find_in(&term.coefficient, scope)?,
                self.find_in(&term.unknown, scope)?,
            ]),
            Expr::Unary(unary) => Record::Unary(unary.op, self.find_in(&unary.operand, scope)?),
            Expr::Binary(binary) => Record::Binary(
                binary.op,
                [self.find_in(&binary.lhs, scope)?, self.find_in(&binary.rhs, scope)?],
            ),
            Expr::Nary(nary) => Record::Nary(
                nary.kind,
                nary.children
                    .iter()
                    .map(|child| self.find_in(child, scope))
                    .collect::<Option<_>>()?,
            ),
            Expr::Call(call) => Record::Call(
                call.name.clone(),
                call.args.iter().map(|arg| self.find_in(arg, scope)).collect::<Option<_>>()?,
            ),
        };

        let existing = self.lookup(&self.weigh(&record)).ok()??;
        (self.records[existing.index()].bound() == record.bound()).then_some(existing)
    }

    fn find_symbol(&self, symbol: &Symbol, scope: &mut Scope) -> Option<(Option<NodeId>, bool)> {
        let shadowed = scope.shadows(&symbol.name);
        let Some(value) = symbol.bound.as_deref() else {
            return Some((None, shadowed));
        };

        scope.binding.push(symbol.name.clone());
        let bound = self.find_in(value, scope);
        scope.binding.pop();
        Some((Some(bound?), shadowed))
    }

    /// Builds the expression of a node of this zone.
    pub(crate) fn build(&self, id: NodeId) -> Expr {
        self.records[id.index()].assemble(|child| self.build(child), |bound| self.build(bound))
    }

    /// Rebuilds the expression tree of the given node, including the values bound to its symbols.
    pub fn to_expr(&self, id: NodeId) -> Result<Expr, CanonError> {
        self.get(id).ok_or(CanonError::UnknownNode { id })?;
        Ok(self.build(id))
    }

    /// Returns true if a symbol named `name` is reachable from the given node, through its
    /// children and the values bound to symbols.
    pub fn reaches(&self, from: NodeId, name: &str) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(record) = self.get(id) else {
                continue;
            };
            if !visited.insert(id) {
                continue;
            }
            if record.name() == Some(name) {
                return true;
            }
            stack.extend(record.children().iter().copied().chain(record.bound()));
        }
        false
    }

    /// Returns the ids of the symbol nodes named `name`, except shadowed ones.
    fn symbols_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.iter()
            .filter(move |(_, record)| record.name() == Some(name) && !record.is_shadowed())
            .map(|(id, _)| id)
    }

    /// Binds `value` to the symbol `name`, which updates every occurrence of the symbol in every
    /// expression of the zone, then publishes the binding to `table`. Returns the number of symbol
    /// nodes bound (at most one per symbol kind).
    ///
    /// The value is inserted into the zone, where an unbound symbol of the value stands for the
    /// zone's symbol of the same name, binding included. This lets the value of one binding build
    /// on another. A value from which `name` is reachable is rejected with
    /// [`CanonError::CyclicBinding`], and nothing is bound.
    pub fn let_<T>(
        &mut self,
        name: &str,
        value: impl Into<Expr>,
        table: &mut T,
    ) -> Result<usize, CanonError>
    where
        T: SymbolTable + ?Sized,
    {
        let value = value.into();
        let value_id = self.insert_in(&value, &mut Scope { adopt: true, ..Scope::default() })?;
        if self.reaches(value_id, name) {
            return Err(CanonError::CyclicBinding { name: name.to_string() });
        }

        let targets = self.symbols_named(name).collect::<Vec<_>>();
        for id in &targets {
            if let Some(bound) = self.records[id.index()].bound_mut() {
                *bound = Some(value_id);
            }
        }

        log::debug!("bound `{}` = {} in {} node(s)", name, value, targets.len());
        table.publish(name, Some(value));
        Ok(targets.len())
    }

    /// Removes the binding of the symbol `name`, and removes `name` from `table`. Returns the
    /// number of symbol nodes unbound.
    pub fn unlet<T>(&mut self, name: &str, table: &mut T) -> usize
    where
        T: SymbolTable + ?Sized,
    {
        let targets = self.symbols_named(name).collect::<Vec<_>>();
        for id in &targets {
            if let Some(bound) = self.records[id.index()].bound_mut() {
                *bound = None;
            }
        }

        log::debug!("unbound `{}` in {} node(s)", name, targets.len());
        table.publish(name, None);
        targets.len()
    }

    /// Computes the partially folded form of the given node. See [`Expr::compute`].
    pub fn compute<T>(&self, id: NodeId, table: &T) -> Result<Expr, CanonError>
    where
        T: SymbolTable + ?Sized,
    {
        self.get(id).ok_or(CanonError::UnknownNode { id })?;
        Ok(ZoneEval::new(self, table).compute(id))
    }

    /// Returns a detached expression for the given node in which every resolvable symbol has been
    /// replaced by its value. See [`Expr::converting`].
    pub fn converting<T>(&self, id: NodeId, table: &T) -> Result<Expr, CanonError>
    where
        T: SymbolTable + ?Sized,
    {
        self.get(id).ok_or(CanonError::UnknownNode { id })?;
        Ok(ZoneEval::new(self, table).converting(id))
    }
}

/// A canonicalized expression: a [`RecordZone`] and the id of the root node in it.
///
/// A [`Formula`] renders and evaluates exactly like the expression it was created from.
#[derive(Debug, Clone)]
pub struct Formula {
    zone: RecordZone,
    root: NodeId,
}

impl Formula {
    /// Canonicalizes the expression into a new zone.
    pub fn new(expr: &Expr) -> Result<Self, CanonError> {
        let mut zone = RecordZone::new();
        let root = zone.insert(expr)?;
        log::debug!(
            "canonicalized {} node(s) into {} record(s)",
            expr.node_count(),
            zone.len(),
        );
        Ok(Self { zone, root })
    }

    /// The zone owning the canonical nodes of this formula.
    pub fn zone(&self) -> &RecordZone {
        &self.zone
    }

    /// The id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Rebuilds the expression tree of this formula.
    pub fn to_expr(&self) -> Expr {
        self.zone.build(self.root)
    }

    /// See [`RecordZone::let_`].
    pub fn let_<T>(
        &mut self,
        name: &str,
        value: impl Into<Expr>,
        table: &mut T,
    ) -> Result<usize, CanonError>
    where
        T: SymbolTable + ?Sized,
    {
        self.zone.let_(name, value, table)
    }

    /// See [`RecordZone::unlet`].
    pub fn unlet<T: SymbolTable + ?Sized>(&mut self, name: &str, table: &mut T) -> usize {
        self.zone.unlet(name, table)
    }

    /// See [`Expr::compute`].
    pub fn compute<T: SymbolTable + ?Sized>(&self, table: &T) -> Expr {
        ZoneEval::new(&self.zone, table).compute(self.root)
    }

    /// See [`Expr::converting`].
    pub fn converting<T: SymbolTable + ?Sized>(&self, table: &T) -> Expr {
        ZoneEval::new(&self.zone, table).converting(self.root)
    }

    /// See [`Expr::try_to_f64`].
    pub fn try_to_f64<T: SymbolTable + ?Sized>(&self, table: &T) -> Option<f64> {
        self.compute(table).as_constant()
    }

    /// See [`Expr::to_double`].
    pub fn to_double<T: SymbolTable + ?Sized>(&self, table: &T) -> f64 {
        self.try_to_f64(table).unwrap_or(0.0)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr())
    }
}

impl Latex for Formula {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.to_expr().fmt_latex(f)
    }
}

impl Expr {
    /// Canonicalizes this expression: every group of structurally equal subexpressions becomes a
    /// single shared node of the returned [`Formula`].
    pub fn make_unique(&self) -> Result<Formula, CanonError> {
        Formula::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use crate::node::{BinaryKind, NaryKind};
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use std::hash::Hasher;

    fn a() -> Expr {
        Expr::symbol("a")
    }

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn duplicate_products_are_shared() {
        let product = Expr::product(vec![a(), x()]);
        let formula = Expr::sum(vec![product.clone(), product.clone()]).make_unique().unwrap();

        // a, x, a*x, a*x+a*x
        assert_eq!(formula.zone().len(), 4);
        let Some(Record::Nary(NaryKind::Sum, children)) = formula.zone().get(formula.root()) else {
            panic!("root is not a sum");
        };
        assert_eq!(children[0], children[1]);
        assert_eq!(formula.zone().find(&product), Some(children[0]));
    }

    #[test]
    fn insert_twice_is_stable() {
        let expr = Expr::add(Expr::mul(a(), x()), Expr::constant(2.0));
        let mut zone = RecordZone::new();
        let first = zone.insert(&expr).unwrap();
        let len = zone.len();

        assert_eq!(zone.insert(&expr).unwrap(), first);
        assert_eq!(zone.len(), len);
        assert_eq!(zone.to_expr(first).unwrap(), expr);
    }

    #[test]
    fn children_come_first() {
        let expr = Expr::pow(Expr::add(a(), Expr::constant(1.0)), Expr::constant(2.0));
        let formula = expr.make_unique().unwrap();
        for (id, record) in formula.zone().iter() {
            assert!(record.children().iter().all(|child| *child < id));
        }
    }

    #[test]
    fn rendering_is_preserved() {
        let expr = Expr::sub(
            Expr::prefixed(BinaryKind::Subtraction, a()),
            Expr::sub(Expr::constant(0.0), a()),
        );
        let formula = expr.make_unique().unwrap();

        assert_eq!(formula.to_string(), expr.to_string());
        assert_eq!(formula.to_tex(), expr.to_tex());
        assert_eq!(formula.to_expr(), expr);
    }

    #[test]
    fn binding_once_binds_everywhere() {
        // (a + x) * (a + x) - a
        let sum = Expr::add(a(), x());
        let mut formula = Expr::sub(Expr::mul(sum.clone(), sum), a()).make_unique().unwrap();
        let mut env = Environment::new();

        assert_eq!(formula.let_("a", 2.0, &mut env), Ok(1));
        assert_eq!(formula.try_to_f64(&env), None);
        assert_eq!(formula.let_("x", 1.0, &mut env), Ok(1));
        assert_float_absolute_eq!(formula.to_double(&()), 7.0);
        assert_eq!(env.get_var("a"), Some(&Expr::constant(2.0)));

        assert_eq!(formula.unlet("x", &mut env), 1);
        assert_eq!(formula.to_double(&()), 0.0);
    }

    #[test]
    fn compute_matches_tree() {
        let mut expr = Expr::sum(vec![
            Expr::product(vec![Expr::constant(2.0), a()]),
            Expr::product(vec![Expr::constant(2.0), a()]),
            Expr::call("sqrt", vec![x()]),
            Expr::constant(1.0),
        ]);
        let mut env = Environment::new();
        expr.let_("a", 3.0, &mut ());
        env.add_var("x", 16.0);

        let formula = expr.make_unique().unwrap();
        assert_eq!(formula.compute(&env), expr.compute(&env));
        assert_eq!(formula.compute(&()), expr.compute(&()));
        assert_eq!(formula.converting(&env), expr.converting(&env));
        assert_float_absolute_eq!(formula.to_double(&env), 17.0);
    }

    #[test]
    fn values_build_on_earlier_bindings() {
        let mut formula = Expr::add(a(), x()).make_unique().unwrap();
        let mut env = Environment::new();
        assert_eq!(formula.let_("a", 2.0, &mut env), Ok(1));
        assert_eq!(formula.let_("x", Expr::mul(a(), Expr::constant(3.0)), &mut env), Ok(1));

        // a, x, a+x, 2, 3, a*3
        assert_eq!(formula.zone().len(), 6);
        assert_float_absolute_eq!(formula.to_double(&()), 8.0);

        let mut tree = Expr::add(a(), x());
        tree.let_("a", 2.0, &mut env);
        tree.let_("x", Expr::mul(a(), Expr::constant(3.0)), &mut env);
        assert_float_absolute_eq!(tree.to_double(&env), 8.0);

        // the value of x shares the node of a
        assert_eq!(formula.let_("a", 5.0, &mut env), Ok(1));
        assert_float_absolute_eq!(formula.to_double(&()), 20.0);
    }

    #[test]
    fn self_reference_matches_tree() {
        let mut expr = Expr::mul(x(), Expr::constant(2.0));
        let mut env = Environment::new();
        expr.let_("x", Expr::add(x(), Expr::constant(1.0)), &mut env);

        let mut formula = expr.make_unique().unwrap();
        assert_eq!(formula.compute(&env), expr.compute(&env));
        assert_eq!(formula.compute(&env).to_string(), "(x+1)*2");
        assert_eq!(formula.compute(&()), expr.compute(&()));
        assert_eq!(formula.converting(&env), expr.converting(&env));
        assert_eq!(formula.to_string(), expr.to_string());
        assert_eq!(formula.to_expr(), expr);

        let shadowed = formula.zone().iter().filter(|(_, record)| record.is_shadowed()).count();
        assert_eq!(shadowed, 1);

        // rebinding x leaves the inner x alone
        assert_eq!(formula.let_("x", 5.0, &mut env), Ok(1));
        assert_eq!(expr.let_("x", 5.0, &mut env), 1);
        assert_float_absolute_eq!(formula.to_double(&env), 10.0);
        assert_float_absolute_eq!(expr.to_double(&env), 10.0);
    }

    #[test]
    fn signed_zero_is_kept() {
        // 0 + 1/(-0)
        let expr = Expr::add(
            Expr::constant(0.0),
            Expr::div(Expr::constant(1.0), Expr::constant(-0.0)),
        );
        let formula = expr.make_unique().unwrap();

        // 0, 1, -0, 1/(-0), 0+1/(-0)
        assert_eq!(formula.zone().len(), 5);
        assert_eq!(formula.to_double(&()), f64::NEG_INFINITY);
        assert_eq!(formula.to_double(&()).to_bits(), expr.to_double(&()).to_bits());
    }

    #[test]
    fn conflicting_bindings() {
        let mut bound = a();
        bound.let_("a", 1.0, &mut ());
        let expr = Expr::add(bound, a());

        assert_eq!(
            expr.make_unique().unwrap_err(),
            CanonError::ConflictingBinding { name: "a".to_string() },
        );
    }

    #[test]
    fn cyclic_binding_is_rejected() {
        let mut formula = Expr::add(a(), x()).make_unique().unwrap();
        let err = formula.let_("a", Expr::mul(x(), a()), &mut ()).unwrap_err();

        assert_eq!(err, CanonError::CyclicBinding { name: "a".to_string() });
        assert_eq!(formula.zone().get(NodeId(0)), Some(&Record::Coefficient {
            name: "a".to_string(),
            bound: None,
            shadowed: false,
        }));
    }

    #[test]
    fn foreign_ids() {
        let formula = Expr::add(a(), x()).make_unique().unwrap();
        let foreign = NodeId(100);

        assert_eq!(formula.zone().weight(foreign), None);
        assert_eq!(formula.zone().get(foreign), None);
        assert_eq!(formula.zone().to_expr(foreign), Err(CanonError::UnknownNode { id: foreign }));
        assert_eq!(
            RecordZone::new().intern(Record::Unary(crate::node::UnaryKind::Negative, foreign)),
            Err(CanonError::UnknownNode { id: foreign }),
        );
    }

    /// A hasher that maps everything to the same hash.
    #[derive(Default)]
    struct Constant;

    impl Hasher for Constant {
        fn finish(&self) -> u64 {
            42
        }

        fn write(&mut self, _: &[u8]) {}
    }

    #[test]
    fn collisions_fail_loudly() {
        let mut zone = RecordZone::with_hasher(BuildHasherDefault::<Constant>::default());
        let one = zone.insert(&Expr::constant(1.0)).unwrap();

        assert_eq!(zone.insert(&Expr::constant(1.0)), Ok(one));
        assert_eq!(
            zone.insert(&Expr::constant(2.0)),
            Err(CanonError::HashCollision { hash: 42, existing: one }),
        );
        assert_eq!(zone.len(), 1);
    }
}
