use std::fmt;
use super::record::NodeId;

/// An error that aborts canonicalization or a binding inside a
/// [`RecordZone`](super::RecordZone).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// Two nodes with different content produced the same structural hash.
    HashCollision {
        /// The shared hash.
        hash: u64,

        /// The canonical node already registered under the hash.
        existing: NodeId,
    },

    /// The same symbol appears with different bound values (or bound in one place and unbound in
    /// another) in the same formula.
    ConflictingBinding {
        name: String,
    },

    /// The value bound to a symbol refers back to that symbol.
    CyclicBinding {
        name: String,
    },

    /// The node id does not belong to the zone.
    UnknownNode {
        id: NodeId,
    },
}

impl fmt::Display for CanonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonError::HashCollision { hash, existing } => write!(
                f,
                "hash collision: {:#018x} already identifies node {} with different content",
                hash,
                existing,
            ),
            CanonError::ConflictingBinding { name } => write!(
                f,
                "`{}` is bound to different values in the same formula",
                name,
            ),
            CanonError::CyclicBinding { name } => write!(
                f,
                "the value bound to `{}` refers back to `{}`",
                name,
                name,
            ),
            CanonError::UnknownNode { id } => write!(f, "node {} does not belong to this zone", id),
        }
    }
}

impl std::error::Error for CanonError {}
