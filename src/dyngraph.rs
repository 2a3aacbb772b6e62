/*!

The concrete succinct dynamic graph, and its implementations of the
graph interface traits.

[`DynGraph`] keeps four stores, all over the vectors in [`crate::dynvec`]:

* [`nodes`](nodes::NodeRecords) — an id string in slot order, the
  concatenated node sequences, a boundary bitmap, and the per-base
  tombstone string
* [`edges`](edges::EdgeLists) — one 0-terminated adjacency segment
  per slot and direction, with parallel orientation-inversion bits
* [`occurrences`](occurrences::StepIndex) — the per-base cross-index
  from sequence positions to (path, rank) visits
* [`paths`](paths::PathRecords) — per-path step arrays and the name
  index

Deletion is two-phase: destroyed nodes leave tombstoned slots and
dead bases behind while paths still reference them, and a later
compaction pass reclaims them. Handles survive compaction because
nodes are addressed by identifier, not by slot.

*/

pub mod edges;
pub mod graph;
pub mod iter;
pub mod nodes;
pub mod occurrences;
pub mod paths;

pub use self::graph::DynGraph;
pub use self::iter::EdgesIter;

use crate::dynvec::DynCollection;
use crate::error::GraphError;
use crate::handle::{Direction, Edge, Handle, NodeId};
use crate::handlegraph::HandleGraph;
use crate::mutablehandlegraph::{
    AdditiveHandleGraph, MutableHandles, SubtractiveHandleGraph,
};
use crate::pathhandlegraph::{PathHandleGraph, PathId, PathStep};

use self::nodes::TOMBSTONE;

impl HandleGraph for DynGraph {
    #[inline]
    fn has_node(&self, node_id: NodeId) -> bool {
        self.nodes.has_node(node_id)
    }

    #[inline]
    fn node_len(&self, handle: Handle) -> usize {
        self.try_node_len(handle).unwrap_or_else(|_| {
            panic!("tried to get the length of node {} which doesn't exist", handle.id())
        })
    }

    #[inline]
    fn sequence(&self, handle: Handle) -> Vec<u8> {
        self.try_sequence(handle).unwrap_or_else(|_| {
            panic!("tried to get the sequence of node {} which doesn't exist", handle.id())
        })
    }

    #[inline]
    fn min_node_id(&self) -> NodeId {
        NodeId::from(self.nodes.min_id)
    }

    #[inline]
    fn max_node_id(&self) -> NodeId {
        NodeId::from(self.nodes.max_id)
    }

    #[inline]
    fn node_count(&self) -> usize {
        self.nodes.node_count
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.edges.edge_count
    }

    fn handle_edges_iter<'a>(
        &'a self,
        handle: Handle,
        dir: Direction,
    ) -> Box<dyn Iterator<Item = Handle> + 'a> {
        let neighbors = self.neighbors_vec(handle, dir).unwrap_or_else(|_| {
            panic!("tried to get neighbors of node {} which doesn't exist", handle.id())
        });
        Box::new(neighbors.into_iter())
    }

    fn handles_iter<'a>(&'a self) -> Box<dyn Iterator<Item = Handle> + 'a> {
        let ids = &self.nodes.ids;
        Box::new((0..ids.len()).filter_map(move |slot| {
            let id = ids.get(slot);
            if id == TOMBSTONE {
                None
            } else {
                Some(Handle::pack(NodeId::from(id), false))
            }
        }))
    }

    fn edges_iter<'a>(&'a self) -> Box<dyn Iterator<Item = Edge> + 'a> {
        Box::new(EdgesIter::new(self))
    }
}

impl AdditiveHandleGraph for DynGraph {
    fn append_handle(&mut self, sequence: &[u8]) -> Result<Handle, GraphError> {
        self.create_handle_impl(sequence, None)
    }

    fn create_handle<T: Into<NodeId>>(
        &mut self,
        sequence: &[u8],
        node_id: T,
    ) -> Result<Handle, GraphError> {
        self.create_handle_impl(sequence, Some(node_id.into()))
    }

    fn create_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.create_edge_impl(edge)
    }
}

impl SubtractiveHandleGraph for DynGraph {
    fn destroy_handle(&mut self, handle: Handle) -> Result<(), GraphError> {
        self.destroy_handle_impl(handle)
    }

    fn destroy_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.destroy_edge_impl(edge)
    }

    fn clear(&mut self) {
        self.clear_impl();
    }
}

impl MutableHandles for DynGraph {
    fn divide_handle(
        &mut self,
        handle: Handle,
        offsets: &[usize],
    ) -> Result<Vec<Handle>, GraphError> {
        self.divide_handle_impl(handle, offsets)
    }

    fn apply_orientation(
        &mut self,
        handle: Handle,
    ) -> Result<Handle, GraphError> {
        self.apply_orientation_impl(handle)
    }

    fn swap_handles(
        &mut self,
        a: Handle,
        b: Handle,
    ) -> Result<(), GraphError> {
        self.swap_handles_impl(a, b)
    }
}

impl PathHandleGraph for DynGraph {
    #[inline]
    fn path_count(&self) -> usize {
        self.paths.path_count
    }

    #[inline]
    fn has_path(&self, name: &[u8]) -> bool {
        self.paths.names.find(name).is_some()
    }

    fn name_to_path_handle(&self, name: &[u8]) -> Option<PathId> {
        self.paths.names.find(name).map(PathId)
    }

    fn path_name(&self, path: PathId) -> Result<Vec<u8>, GraphError> {
        self.paths.record(path)?;
        self.paths
            .names
            .name_of(path.0)
            .ok_or(GraphError::NoSuchPath(path))
    }

    fn path_len(&self, path: PathId) -> Result<usize, GraphError> {
        Ok(self.paths.record(path)?.len())
    }

    fn handle_of_step(&self, step: &PathStep) -> Option<Handle> {
        self.step_handle(step)
    }

    fn path_begin(&self, path: PathId) -> Result<PathStep, GraphError> {
        let len = self.paths.record(path)?.len();
        Ok(if len > 0 {
            PathStep::Step(path, 0)
        } else {
            PathStep::End(path)
        })
    }

    fn path_end(&self, path: PathId) -> Result<PathStep, GraphError> {
        self.paths.record(path)?;
        Ok(PathStep::End(path))
    }

    fn path_back(&self, path: PathId) -> Result<PathStep, GraphError> {
        let len = self.paths.record(path)?.len();
        Ok(if len > 0 {
            PathStep::Step(path, len - 1)
        } else {
            PathStep::Front(path)
        })
    }

    fn path_front_end(&self, path: PathId) -> Result<PathStep, GraphError> {
        self.paths.record(path)?;
        Ok(PathStep::Front(path))
    }

    fn next_step(&self, step: &PathStep) -> PathStep {
        match *step {
            PathStep::Front(p) => {
                if self.path_len_or_zero(p) > 0 {
                    PathStep::Step(p, 0)
                } else {
                    PathStep::End(p)
                }
            }
            PathStep::Step(p, ix) => {
                if ix + 1 < self.path_len_or_zero(p) {
                    PathStep::Step(p, ix + 1)
                } else {
                    PathStep::End(p)
                }
            }
            PathStep::End(p) => PathStep::End(p),
        }
    }

    fn previous_step(&self, step: &PathStep) -> PathStep {
        match *step {
            PathStep::Front(p) => PathStep::Front(p),
            PathStep::Step(p, ix) => {
                if ix > 0 {
                    PathStep::Step(p, ix - 1)
                } else {
                    PathStep::Front(p)
                }
            }
            PathStep::End(p) => {
                let len = self.path_len_or_zero(p);
                if len > 0 {
                    PathStep::Step(p, len - 1)
                } else {
                    PathStep::Front(p)
                }
            }
        }
    }

    #[inline]
    fn step_count_on_handle(&self, handle: Handle) -> usize {
        self.step_count_on_handle_impl(handle)
    }

    fn create_path_handle(
        &mut self,
        name: &[u8],
    ) -> Result<PathId, GraphError> {
        self.paths.create(name)
    }

    fn destroy_path(&mut self, path: PathId) -> Result<(), GraphError> {
        self.destroy_path_impl(path)
    }

    fn append_step(
        &mut self,
        path: PathId,
        to_append: Handle,
    ) -> Result<PathStep, GraphError> {
        self.append_step_impl(path, to_append)
    }

    fn prepend_step(
        &mut self,
        path: PathId,
        to_prepend: Handle,
    ) -> Result<PathStep, GraphError> {
        self.prepend_step_impl(path, to_prepend)
    }

    fn paths_iter<'a>(&'a self) -> Box<dyn Iterator<Item = PathId> + 'a> {
        Box::new(self.paths.live_ids())
    }

    fn steps_iter<'a>(
        &'a self,
        path: PathId,
    ) -> Box<dyn Iterator<Item = PathStep> + 'a> {
        let len = self.path_len_or_zero(path);
        Box::new((0..len).map(move |ix| PathStep::Step(path, ix)))
    }

    fn occurrences_iter<'a>(
        &'a self,
        handle: Handle,
    ) -> Box<dyn Iterator<Item = PathStep> + 'a> {
        Box::new(self.steps_on_handle_vec(handle).into_iter())
    }
}
