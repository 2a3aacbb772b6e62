/*!

Traits for immutable access to the nodes and edges of a graph.

Iteration comes in two shapes: iterator-returning methods
(`handles_iter`, `edges_iter`, `handle_edges_iter`) and the
callback-driven `follow_edges`/`for_each_*` family. The callbacks
return a bool, `false` meaning stop; a callback with nothing to say
about stopping can be wrapped with [`always`].

*/

use crate::error::GraphError;
use crate::handle::{Direction, Edge, Handle, NodeId};

/// Wrap a callback with no interest in stopping early into the
/// boolean-returning iteratee shape used by the `for_each_*` family.
pub fn always<T, F: FnMut(T)>(mut f: F) -> impl FnMut(T) -> bool {
    move |x| {
        f(x);
        true
    }
}

/// Trait encapsulating the immutable aspects of a handlegraph
pub trait HandleGraph {
    fn has_node(&self, node_id: NodeId) -> bool;

    /// Look up the handle for the node with the given ID in the given
    /// orientation.
    fn get_handle(
        &self,
        node_id: NodeId,
        is_reverse: bool,
    ) -> Result<Handle, GraphError> {
        if self.has_node(node_id) {
            Ok(Handle::pack(node_id, is_reverse))
        } else {
            Err(GraphError::NoSuchNode(node_id))
        }
    }

    /// The length of the sequence of a given node
    fn node_len(&self, handle: Handle) -> usize;

    /// Returns the sequence of a node in the handle's local forward
    /// orientation. Copies the sequence, as the sequence in the graph
    /// may be reversed depending on orientation.
    fn sequence(&self, handle: Handle) -> Vec<u8>;

    fn subsequence(
        &self,
        handle: Handle,
        index: usize,
        size: usize,
    ) -> Vec<u8> {
        self.sequence(handle)[index..index + size].into()
    }

    fn base(&self, handle: Handle, index: usize) -> u8 {
        self.sequence(handle)[index]
    }

    fn min_node_id(&self) -> NodeId;
    fn max_node_id(&self) -> NodeId;

    /// Return the total number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Return the total number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Sum up all the sequences in the graph
    fn total_length(&self) -> usize {
        self.handles_iter().map(|h| self.node_len(h)).sum()
    }

    fn degree(&self, handle: Handle, dir: Direction) -> usize {
        self.handle_edges_iter(handle, dir).count()
    }

    fn has_edge(&self, left: Handle, right: Handle) -> bool {
        self.handle_edges_iter(left, Direction::Right)
            .any(|h| h == right)
    }

    /// Such a pair can be viewed from either inward end handle and
    /// produce the outward handle you would arrive at.
    fn traverse_edge_handle(
        &self,
        edge: &Edge,
        left: Handle,
    ) -> Result<Handle, GraphError> {
        edge.traverse(left)
    }

    /// Returns an iterator over the neighbors of a handle in a
    /// given direction
    fn handle_edges_iter<'a>(
        &'a self,
        handle: Handle,
        dir: Direction,
    ) -> Box<dyn Iterator<Item = Handle> + 'a>;

    /// Returns an iterator over all the handles in the graph, in
    /// their local forward orientation and internal stored order
    fn handles_iter<'a>(&'a self) -> Box<dyn Iterator<Item = Handle> + 'a>;

    /// Returns an iterator over all the edges in the graph, each edge
    /// appearing exactly once in its canonical order
    fn edges_iter<'a>(&'a self) -> Box<dyn Iterator<Item = Edge> + 'a>;

    /// Loop over all the handles to next/previous (right/left) nodes,
    /// in stored order. The iteratee returns `false` to stop
    /// iterating; returns `true` if iteration finished.
    fn follow_edges<F>(
        &self,
        handle: Handle,
        go_left: bool,
        mut iteratee: F,
    ) -> bool
    where
        Self: Sized,
        F: FnMut(Handle) -> bool,
    {
        let dir = if go_left {
            Direction::Left
        } else {
            Direction::Right
        };
        for h in self.handle_edges_iter(handle, dir) {
            if !iteratee(h) {
                return false;
            }
        }
        true
    }

    /// Loop over all the nodes in the graph in their local forward
    /// orientations, in their internal stored order. Stops at the
    /// first `false` from the iteratee and returns `false`; otherwise
    /// returns `true`.
    fn for_each_handle<F>(&self, mut iteratee: F) -> bool
    where
        Self: Sized,
        F: FnMut(Handle) -> bool,
    {
        for h in self.handles_iter() {
            if !iteratee(h) {
                return false;
            }
        }
        true
    }

    /// The parallel flavor of [`HandleGraph::for_each_handle`]:
    /// iteration order is unspecified, the iteratee runs on worker
    /// threads and must not mutate the graph, and early termination
    /// is best-effort.
    fn for_each_handle_par<F>(&self, iteratee: F) -> bool
    where
        Self: Sized + Sync,
        F: Fn(Handle) -> bool + Send + Sync,
    {
        use rayon::prelude::*;
        use std::sync::atomic::{AtomicBool, Ordering};

        let keep_going = AtomicBool::new(true);
        let handles: Vec<Handle> = self.handles_iter().collect();

        handles.par_iter().for_each(|&handle| {
            if keep_going.load(Ordering::Relaxed) && !iteratee(handle) {
                keep_going.store(false, Ordering::Relaxed);
            }
        });

        keep_going.load(Ordering::Relaxed)
    }

    /// Loop over all the edges in the graph, visiting each edge
    /// exactly once in its canonical order, with the same
    /// stop-on-`false` contract as the other iterations.
    fn for_each_edge<F>(&self, mut iteratee: F) -> bool
    where
        Self: Sized,
        F: FnMut(Edge) -> bool,
    {
        for edge in self.edges_iter() {
            if !iteratee(edge) {
                return false;
            }
        }
        true
    }
}
