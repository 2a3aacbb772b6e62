use crate::handle::{Direction, Edge, Handle};
use crate::handlegraph::HandleGraph;

use super::graph::DynGraph;

/// Iterator over all edges of the graph, yielding each edge exactly
/// once as its canonical pair.
///
/// For every forward handle, a rightward edge to neighbor `n` is
/// included iff the handle's id is not larger than `n`'s (equality
/// picks up rightward self-loops), and a leftward edge from neighbor
/// `p` is included iff the handle's id is smaller than `p`'s, or they
/// are equal and `p` is reversed (which captures left-side reversing
/// self-loops).
pub struct EdgesIter<'a> {
    graph: &'a DynGraph,
    handles: Box<dyn Iterator<Item = Handle> + 'a>,
    current: Option<Handle>,
    rights: std::vec::IntoIter<Handle>,
    lefts: std::vec::IntoIter<Handle>,
}

impl<'a> EdgesIter<'a> {
    pub(crate) fn new(graph: &'a DynGraph) -> Self {
        Self {
            graph,
            handles: graph.handles_iter(),
            current: None,
            rights: Vec::new().into_iter(),
            lefts: Vec::new().into_iter(),
        }
    }
}

impl<'a> Iterator for EdgesIter<'a> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        loop {
            if let Some(handle) = self.current {
                while let Some(next) = self.rights.next() {
                    if handle.id() <= next.id() {
                        return Some(Edge::edge_handle(handle, next));
                    }
                }
                while let Some(prev) = self.lefts.next() {
                    if handle.id() < prev.id()
                        || (handle.id() == prev.id() && prev.is_reverse())
                    {
                        return Some(Edge::edge_handle(prev, handle));
                    }
                }
            }

            let handle = self.handles.next()?;
            self.current = Some(handle);
            self.rights = self
                .graph
                .neighbors_vec(handle, Direction::Right)
                .unwrap_or_default()
                .into_iter();
            self.lefts = self
                .graph
                .neighbors_vec(handle, Direction::Left)
                .unwrap_or_default()
                .into_iter();
        }
    }
}
