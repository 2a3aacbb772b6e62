use std::cmp::Ordering;
use std::ops::Add;

use crate::error::GraphError;

/// A node identifier. Identifiers are 1-based; zero is reserved as
/// the tombstone symbol in the backing stores and is never a valid
/// node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl From<u64> for NodeId {
    fn from(num: u64) -> Self {
        NodeId(num)
    }
}

impl From<NodeId> for u64 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl Add<u64> for NodeId {
    type Output = Self;

    fn add(self, other: u64) -> Self {
        let NodeId(i) = self;
        NodeId(i + other)
    }
}

impl NodeId {
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An oriented view of a node: the node's identifier together with
/// the strand it is read on. The internal encoding packs the
/// orientation into the lowest bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u64);

impl Handle {
    #[inline]
    pub const fn as_integer(self) -> u64 {
        let Handle(i) = self;
        i
    }

    #[inline]
    pub const fn from_integer(i: u64) -> Self {
        Handle(i)
    }

    #[inline]
    pub const fn unpack_number(self) -> u64 {
        self.as_integer() >> 1
    }

    #[inline]
    pub const fn unpack_bit(self) -> bool {
        self.as_integer() & 1 != 0
    }

    pub fn pack<I: Into<NodeId>>(node_id: I, is_reverse: bool) -> Handle {
        let NodeId(id) = node_id.into();
        if id < (0x1 << 63) {
            Handle::from_integer((id << 1) | is_reverse as u64)
        } else {
            panic!(
                "Tried to create a handle with a node ID that filled 64 bits"
            )
        }
    }

    #[inline]
    pub fn id(self) -> NodeId {
        NodeId(self.unpack_number())
    }

    #[inline]
    pub fn is_reverse(self) -> bool {
        self.unpack_bit()
    }

    /// The same node viewed on the other strand.
    #[inline]
    pub fn flip(self) -> Self {
        Handle(self.as_integer() ^ 1)
    }

    /// The forward-strand view of the node.
    #[inline]
    pub fn forward(self) -> Self {
        Handle(self.as_integer() & !1)
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.id(), if self.is_reverse() { "-" } else { "+" })
    }
}

/// An ordered pair of handles denoting an edge: the right side of the
/// first connects to the left side of the second. Two pairs denote
/// the same edge iff one is the orientation-reverse of the other;
/// [`Edge::edge_handle`] picks the canonical representative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Handle, pub Handle);

impl Edge {
    /// The canonical ordered pair for the edge between `left`'s right
    /// side and `right`'s left side: `(a, b)` is canonical iff the id
    /// of `a` is smaller, or the ids are equal and `a` is not the
    /// only reversed endpoint.
    pub fn edge_handle(left: Handle, right: Handle) -> Edge {
        let canonical = match left.id().cmp(&right.id()) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => left.is_reverse() <= right.is_reverse(),
        };

        if canonical {
            Edge(left, right)
        } else {
            Edge(right.flip(), left.flip())
        }
    }

    /// Viewing the edge from one inward endpoint, produce the outward
    /// handle at the other end.
    pub fn traverse(&self, left: Handle) -> Result<Handle, GraphError> {
        let Edge(el, er) = *self;

        if left == el {
            Ok(er)
        } else if left == er.flip() {
            Ok(el.flip())
        } else {
            Err(GraphError::InvalidHandle)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    Left,
    Right,
}
