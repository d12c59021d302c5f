use crate::node::{Binary, BinaryOp, Expr, NaryKind, Symbol, UnaryKind};
use std::fmt;

/// The identity of a canonical node inside a [`RecordZone`](super::RecordZone).
///
/// A [`NodeId`] is an index into the zone that created it. Ids are never reused, and an id is
/// only meaningful for the zone that returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the index of this id in its zone.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A canonical node: the shape of an [`Expr`] whose children are [`NodeId`]s of other canonical
/// nodes in the same zone.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Constant(f64),

    /// A coefficient symbol. See [`Record::is_shadowed`] for `shadowed`.
    Coefficient {
        name: String,
        bound: Option<NodeId>,
        shadowed: bool,
    },

    /// An unknown-term symbol. See [`Record::is_shadowed`] for `shadowed`.
    UnknownTerm {
        name: String,
        bound: Option<NodeId>,
        shadowed: bool,
    },

    /// `[constant, coefficient, unknown]`
    Term([NodeId; 3]),
    Unary(UnaryKind, NodeId),

    /// `[lhs, rhs]`
    Binary(BinaryOp, [NodeId; 2]),
    Nary(NaryKind, Vec<NodeId>),
    Call(String, Vec<NodeId>),
}

impl Record {
    /// Returns the child slots of this record, in order.
    ///
    /// Values bound to symbols are not children.
    pub fn children(&self) -> &[NodeId] {
        match self {
            Record::Constant(_) | Record::Coefficient { .. } | Record::UnknownTerm { .. } => &[],
            Record::Term(slots) => slots,
            Record::Unary(_, operand) => std::slice::from_ref(operand),
            Record::Binary(_, operands) => operands,
            Record::Nary(_, children) | Record::Call(_, children) => children,
        }
    }

    /// Returns the name of this record if it is a symbol.
    pub fn name(&self) -> Option<&str> {
        match self {
            Record::Coefficient { name, .. } | Record::UnknownTerm { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the value bound to this record if it is a bound symbol.
    pub fn bound(&self) -> Option<NodeId> {
        match self {
            Record::Coefficient { bound, .. } | Record::UnknownTerm { bound, .. } => *bound,
            _ => None,
        }
    }

    /// Returns true if this record is a symbol occurring inside the value bound to a symbol of the
    /// same name, such as the inner `x` of `x` bound to `x+1`.
    ///
    /// Such an occurrence is a node of its own, apart from the symbol whose value contains it. It
    /// stays symbolic when that symbol is evaluated, and binding the name leaves it alone.
    pub fn is_shadowed(&self) -> bool {
        matches!(
            self,
            Record::Coefficient { shadowed: true, .. } | Record::UnknownTerm { shadowed: true, .. },
        )
    }

    /// Returns a mutable reference to the binding slot of this record if it is a symbol.
    pub(crate) fn bound_mut(&mut self) -> Option<&mut Option<NodeId>> {
        match self {
            Record::Coefficient { bound, .. } | Record::UnknownTerm { bound, .. } => Some(bound),
            _ => None,
        }
    }

    /// Builds an [`Expr`] of this record's shape, mapping each child slot to an expression with
    /// `child` and the value bound to a symbol record with `bound`.
    pub(crate) fn assemble(
        &self,
        mut child: impl FnMut(NodeId) -> Expr,
        bound: impl FnOnce(NodeId) -> Expr,
    ) -> Expr {
        let symbol = |name: &String, id: &Option<NodeId>| Symbol {
            name: name.clone(),
            bound: id.map(|id| Box::new(bound(id))),
        };

        match self {
            Record::Constant(n) => Expr::Constant(*n),
            Record::Coefficient { name, bound: id, .. } => Expr::Coefficient(symbol(name, id)),
            Record::UnknownTerm { name, bound: id, .. } => Expr::UnknownTerm(symbol(name, id)),
            Record::Term([constant, coefficient, unknown]) => {
                Expr::term(child(*constant), child(*coefficient), child(*unknown))
            },
            Record::Unary(op, operand) => Expr::unary(*op, child(*operand)),
            Record::Binary(op, [lhs, rhs]) => Expr::Binary(Binary {
                op: *op,
                lhs: Box::new(child(*lhs)),
                rhs: Box::new(child(*rhs)),
            }),
            Record::Nary(kind, children) => {
                Expr::nary(*kind, children.iter().map(|id| child(*id)).collect())
            },
            Record::Call(name, args) => {
                Expr::call(name.clone(), args.iter().map(|id| child(*id)).collect())
            },
        }
    }
}
