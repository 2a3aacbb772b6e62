/*!

Traits for manipulating the nodes and edges of a graph.

*/

use crate::error::GraphError;
use crate::handle::{Edge, Handle, NodeId};

/// Methods for adding handles and edges to a graph.
pub trait AdditiveHandleGraph {
    /// Add a node with the provided sequence to the graph, letting
    /// the graph pick the node ID.
    fn append_handle(&mut self, sequence: &[u8]) -> Result<Handle, GraphError>;

    /// Add a node with the provided sequence and ID to the graph.
    /// Fails if the ID is already in use by a live node; an ID below
    /// the current minimum is accepted and extends the ID range.
    fn create_handle<T: Into<NodeId>>(
        &mut self,
        sequence: &[u8],
        node_id: T,
    ) -> Result<Handle, GraphError>;

    /// Insert an edge into the graph. Both endpoints must exist.
    /// Inserting an edge that already exists is a no-op.
    fn create_edge(&mut self, edge: Edge) -> Result<(), GraphError>;
}

/// Methods for removing handles and edges from a graph.
pub trait SubtractiveHandleGraph {
    /// Remove the node belonging to the given handle, along with all
    /// of its edges. Steps on the node are tombstoned, not removed
    /// from their paths; handles to the node and step handles on it
    /// are invalidated.
    ///
    /// Must not be called on the node from which edges are currently
    /// being followed, nor during parallel iteration.
    fn destroy_handle(&mut self, handle: Handle) -> Result<(), GraphError>;

    /// Remove the edge connecting the given handles in the given
    /// order and orientations. Removing a nonexistent edge is a
    /// no-op.
    fn destroy_edge(&mut self, edge: Edge) -> Result<(), GraphError>;

    /// Remove all nodes, edges, and paths.
    fn clear(&mut self);
}

/// Methods for manipulating handles that already exist in a graph.
pub trait MutableHandles: AdditiveHandleGraph {
    /// Split the node behind `handle` at the given offsets, in terms
    /// of the handle's orientation. The pieces keep the node's local
    /// forward orientation, but the returned handles come in the
    /// order and orientation of the handle passed in. Paths through
    /// the node are rewritten to visit the pieces; other handles to
    /// the node, and step handles on it, are invalidated.
    fn divide_handle(
        &mut self,
        handle: Handle,
        offsets: &[usize],
    ) -> Result<Vec<Handle>, GraphError>;

    /// Divide the given handle at a single offset. Default
    /// implementation uses `divide_handle()`, and there's probably no
    /// need to provide another implementation.
    fn split_handle(
        &mut self,
        handle: Handle,
        offset: usize,
    ) -> Result<(Handle, Handle), GraphError> {
        let handles = self.divide_handle(handle, &[offset])?;
        Ok((handles[0], handles[1]))
    }

    /// Transform the node that `handle` corresponds to so that the
    /// orientation of `handle` becomes the node's forward
    /// orientation: the stored sequence, the incident edges, and the
    /// steps on the node are all rewritten. Invalidates all handles
    /// to the node; returns a fresh forward handle.
    fn apply_orientation(
        &mut self,
        handle: Handle,
    ) -> Result<Handle, GraphError>;

    /// Swap the internal slots of the two nodes. Observable only
    /// through `for_each_handle` order; the handles themselves stay
    /// valid, as nodes are addressed by ID.
    fn swap_handles(&mut self, a: Handle, b: Handle)
        -> Result<(), GraphError>;
}

/// A graph that supports all forms of handle- and edge-related
/// mutation.
///
/// Has a blanket implementation for all graphs that implement the
/// other traits in this module.
pub trait MutableHandleGraph:
    AdditiveHandleGraph + SubtractiveHandleGraph + MutableHandles
{
}

impl<T> MutableHandleGraph for T where
    T: AdditiveHandleGraph + SubtractiveHandleGraph + MutableHandles
{
}
