use crate::node::{BinaryKind, NaryKind, UnaryKind};
use std::hash::{Hash, Hasher};
use super::record::{NodeId, Record};

/// The kind of a canonical node, as far as identity is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Constant,
    Coefficient,
    UnknownTerm,
    Term,
    Unary(UnaryKind),
    Binary(BinaryKind),

    /// A sign prefix, such as `-x`. Kept apart from [`KindTag::Binary`] so that `-x` and `0-x`
    /// never share a node and keep rendering differently.
    Prefix(BinaryKind),
    Nary(NaryKind),
    Call,
}

/// The content of a canonical node, as far as identity is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Payload {
    /// The bit pattern of a number. Every NaN is stored as the same NaN; `0.0` and `-0.0` stay
    /// apart.
    Number(u64),

    /// The name of a symbol.
    Name(String),

    /// The name of a shadowed symbol. See [`Record::is_shadowed`].
    Shadowed(String),

    /// The canonical children of a composite node, in order.
    Children(Vec<NodeId>),

    /// The name and canonical arguments of a call.
    Call(String, Vec<NodeId>),
}

/// Returns the bit pattern identifying a number.
fn number_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

/// Returns the payload identifying a symbol.
fn symbol(name: &str, shadowed: bool) -> Payload {
    if shadowed {
        Payload::Shadowed(name.to_string())
    } else {
        Payload::Name(name.to_string())
    }
}

/// The immutable, content-derived identity of a canonical node.
///
/// Two weights compare equal when their kind and payload are equal. Since the children in a
/// payload are already canonical, comparing them by [`NodeId`] is the same as comparing the
/// child subtrees structurally, so equality takes time proportional to the number of children
/// rather than to the size of the subtree.
///
/// The structural hash is computed from the kind, the payload, and the *hashes* of the children,
/// so equal subtrees hash equally even across different zones using the same hasher.
#[derive(Debug, Clone)]
pub struct Weight {
    kind: KindTag,
    payload: Payload,
    hash: u64,
}

impl PartialEq for Weight {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.payload == other.payload
    }
}

impl Weight {
    /// Computes the weight of a record whose children have the given hashes.
    pub(crate) fn of<H: Hasher>(
        record: &Record,
        child_hash: impl Fn(NodeId) -> u64,
        mut hasher: H,
    ) -> Self {
        let (kind, payload) = match record {
            Record::Constant(n) => (KindTag::Constant, Payload::Number(number_bits(*n))),
            Record::Coefficient { name, shadowed, .. } => (KindTag::Coefficient, symbol(name, *shadowed)),
            Record::UnknownTerm { name, shadowed, .. } => (KindTag::UnknownTerm, symbol(name, *shadowed)),
            Record::Term(slots) => (KindTag::Term, Payload::Children(slots.to_vec())),
            Record::Unary(op, operand) => (KindTag::Unary(*op), Payload::Children(vec![*operand])),
            Record::Binary(op, operands) => {
                let kind = if op.implicit {
                    KindTag::Prefix(op.kind)
                } else {
                    KindTag::Binary(op.kind)
                };
                (kind, Payload::Children(operands.to_vec()))
            },
            Record::Nary(kind, children) => (KindTag::Nary(*kind), Payload::Children(children.clone())),
            Record::Call(name, args) => (KindTag::Call, Payload::Call(name.clone(), args.clone())),
        };

        kind.hash(&mut hasher);
        match &payload {
            Payload::Number(bits) => bits.hash(&mut hasher),
            Payload::Name(name) => name.hash(&mut hasher),
            Payload::Shadowed(name) => {
                true.hash(&mut hasher);
                name.hash(&mut hasher);
            },
            Payload::Children(children) => {
                children.len().hash(&mut hasher);
                for child in children {
                    child_hash(*child).hash(&mut hasher);
                }
            },
            Payload::Call(name, args) => {
                name.hash(&mut hasher);
                args.len().hash(&mut hasher);
                for arg in args {
                    child_hash(*arg).hash(&mut hasher);
                }
            },
        }

        Self { kind, payload, hash: hasher.finish() }
    }

    /// The kind of the node.
    pub fn kind(&self) -> KindTag {
        self.kind
    }

    /// The content of the node.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The structural hash of the node.
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::BinaryOp;
    use std::collections::hash_map::DefaultHasher;

    fn weigh(record: &Record) -> Weight {
        Weight::of(record, |id| id.0 as u64, DefaultHasher::new())
    }

    #[test]
    fn signed_zero_and_nan() {
        assert_ne!(weigh(&Record::Constant(0.0)), weigh(&Record::Constant(-0.0)));
        assert_ne!(weigh(&Record::Constant(0.0)).hash(), weigh(&Record::Constant(-0.0)).hash());
        assert_eq!(weigh(&Record::Constant(f64::NAN)), weigh(&Record::Constant(-f64::NAN)));
        assert_ne!(weigh(&Record::Constant(1.0)), weigh(&Record::Constant(2.0)));
    }

    #[test]
    fn prefix_is_not_subtraction() {
        let ids = [NodeId(0), NodeId(1)];
        let prefix = Record::Binary(BinaryOp { kind: BinaryKind::Subtraction, implicit: true }, ids);
        let explicit = Record::Binary(BinaryOp::new(BinaryKind::Subtraction), ids);
        assert_ne!(weigh(&prefix), weigh(&explicit));
        assert_ne!(weigh(&prefix).hash(), weigh(&explicit).hash());
    }

    #[test]
    fn symbols_weigh_by_name() {
        let symbol = |bound, shadowed| Record::Coefficient { name: "a".to_string(), bound, shadowed };
        let unknown = Record::UnknownTerm { name: "a".to_string(), bound: None, shadowed: false };
        assert_eq!(weigh(&symbol(Some(NodeId(3)), false)), weigh(&symbol(None, false)));
        assert_ne!(weigh(&symbol(None, false)), weigh(&unknown));

        let shadowed = weigh(&symbol(None, true));
        assert_ne!(shadowed, weigh(&symbol(None, false)));
        assert_ne!(shadowed.hash(), weigh(&symbol(None, false)).hash());
    }

    #[test]
    fn order_matters() {
        let ab = Record::Nary(NaryKind::Sum, vec![NodeId(0), NodeId(1)]);
        let ba = Record::Nary(NaryKind::Sum, vec![NodeId(1), NodeId(0)]);
        assert_ne!(weigh(&ab), weigh(&ba));
    }
}
