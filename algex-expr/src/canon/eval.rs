use crate::env::SymbolTable;
use crate::eval::{fold, Resolver};
use crate::node::Expr;
use std::hash::BuildHasher;
use super::{record::{NodeId, Record}, RecordZone};

/// Evaluates the canonical nodes of a zone.
///
/// Every node is folded at most once per evaluator while no symbol is being resolved; folds made
/// while resolving a symbol depend on which symbols are being resolved, and are not memoized.
pub(crate) struct ZoneEval<'z, 't, S, T: ?Sized> {
    zone: &'z RecordZone<S>,
    resolver: Resolver<'t, T>,
    memo: Vec<Option<Expr>>,
}

impl<'z, 't, S, T> ZoneEval<'z, 't, S, T>
where
    S: BuildHasher,
    T: SymbolTable + ?Sized,
{
    pub fn new(zone: &'z RecordZone<S>, table: &'t T) -> Self {
        Self {
            zone,
            resolver: Resolver::new(table),
            memo: vec![None; zone.len()],
        }
    }

    /// Computes the partially folded form of the given node, with the same result as
    /// [`Expr::compute`] on the node's expression.
    pub fn compute(&mut self, id: NodeId) -> Expr {
        let idle = self.resolver.is_idle();
        if idle {
            if let Some(Some(memo)) = self.memo.get(id.index()) {
                return memo.clone();
            }
        }

        let zone = self.zone;
        let result = match &zone.records[id.index()] {
            Record::Constant(n) => Expr::Constant(*n),
            Record::Coefficient { name, bound, .. } | Record::UnknownTerm { name, bound, .. } => {
                self.compute_symbol(id, name, *bound)
            },
            Record::Term([constant, coefficient, unknown]) => fold::term(
                self.compute(*constant),
                self.compute(*coefficient),
                self.compute(*unknown),
            ),
            Record::Unary(op, operand) => fold::unary(*op, self.compute(*operand)),
            Record::Binary(op, [lhs, rhs]) => {
                fold::binary(*op, self.compute(*lhs), self.compute(*rhs))
            },
            Record::Nary(kind, children) => fold::nary(
                *kind,
                children.iter().map(|child| self.compute(*child)).collect(),
            ),
            Record::Call(name, args) => fold::call(
                name,
                args.iter().map(|arg| self.compute(*arg)).collect(),
            ),
        };

        if idle {
            self.memo[id.index()] = Some(result.clone());
        }
        result
    }

    fn compute_symbol(&mut self, id: NodeId, name: &str, bound: Option<NodeId>) -> Expr {
        if self.resolver.is_active(name) {
            return self.zone.build(id);
        }

        if let Some(bound) = bound {
            self.resolver.enter(name);
            let result = self.compute(bound);
            self.resolver.leave();
            result
        } else if let Some(value) = self.resolver.lookup(name) {
            self.resolver.enter(name);
            let result = self.resolver.compute(&value);
            self.resolver.leave();
            result
        } else {
            self.zone.build(id)
        }
    }

    /// Returns a detached expression for the given node in which every resolvable symbol has been
    /// replaced by its value, with the same result as [`Expr::converting`].
    pub fn converting(&mut self, id: NodeId) -> Expr {
        let zone = self.zone;
        let record = &zone.records[id.index()];
        let Some(name) = record.name() else {
            return record.assemble(|child| self.converting(child), |bound| zone.build(bound));
        };

        if self.resolver.is_active(name) {
            return zone.build(id);
        }

        if let Some(bound) = record.bound() {
            self.resolver.enter(name);
            let result = self.converting(bound);
            self.resolver.leave();
            result
        } else if let Some(value) = self.resolver.lookup(name) {
            self.resolver.enter(name);
            let result = self.resolver.converting(&value);
            self.resolver.leave();
            result
        } else {
            zone.build(id)
        }
    }
}
