/*!

The stable, integer-shaped surface of the graph, for foreign callers
and persistence.

Node handles cross the boundary as `u64` (the packed id/orientation
word), path handles as `u64`, and steps as the 128-bit composite of
[`PathStep::as_integer`]. The layout probes let a binding check its
assumptions about those widths at load time.

Save and load move the graph through a flat snapshot serialized with
bincode; the blob is opaque to callers.

*/

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

#[allow(unused_imports)]
use log::{debug, info};

use crate::dyngraph::DynGraph;
use crate::handle::{Edge, Handle, NodeId};
use crate::handlegraph::HandleGraph;
use crate::mutablehandlegraph::AdditiveHandleGraph;
use crate::pathhandlegraph::{PathHandleGraph, PathId, PathStep};

/// The crate version, for foreign callers.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Width of a node handle in bytes.
pub const fn node_handle_size() -> usize {
    std::mem::size_of::<u64>()
}

/// Width of a path handle in bytes.
pub const fn path_handle_size() -> usize {
    std::mem::size_of::<u64>()
}

/// Width of an edge handle (an ordered pair of node handles) in
/// bytes.
pub const fn edge_handle_size() -> usize {
    2 * std::mem::size_of::<u64>()
}

/// Width of the step composite in bytes.
pub const fn step_handle_size() -> usize {
    std::mem::size_of::<u128>()
}

/// Width of a node id in bytes.
pub const fn node_id_size() -> usize {
    std::mem::size_of::<u64>()
}

// ----- persistence -----

/// The flat snapshot moved through bincode by `save` and `load`.
#[derive(Debug, Serialize, Deserialize)]
struct GraphBlob {
    nodes: Vec<(u64, Vec<u8>)>,
    edges: Vec<(u64, u64)>,
    paths: Vec<(Vec<u8>, Vec<u64>)>,
}

fn to_io_error(err: bincode::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

/// Write the graph to `path` as an opaque blob.
pub fn save<P: AsRef<Path>>(graph: &DynGraph, path: P) -> io::Result<()> {
    let blob = GraphBlob {
        nodes: graph
            .handles_iter()
            .map(|h| (u64::from(h.id()), graph.sequence(h)))
            .collect(),
        edges: graph
            .edges_iter()
            .map(|Edge(l, r)| (l.as_integer(), r.as_integer()))
            .collect(),
        paths: graph
            .paths_iter()
            .map(|p| {
                let name = graph.path_name(p).unwrap();
                let steps = graph
                    .steps_iter(p)
                    .filter_map(|s| graph.handle_of_step(&s))
                    .map(Handle::as_integer)
                    .collect();
                (name, steps)
            })
            .collect(),
    };

    let file = BufWriter::new(File::create(path)?);
    let result = bincode::serialize_into(file, &blob).map_err(to_io_error);
    debug!(
        "saved graph: {} nodes, {} edges, {} paths",
        blob.nodes.len(),
        blob.edges.len(),
        blob.paths.len()
    );
    result
}

/// Read a graph previously written by [`save`].
pub fn load<P: AsRef<Path>>(path: P) -> io::Result<DynGraph> {
    let file = BufReader::new(File::open(path)?);
    let blob: GraphBlob =
        bincode::deserialize_from(file).map_err(to_io_error)?;

    let mut graph = DynGraph::new();
    let bad_blob =
        |err| io::Error::new(io::ErrorKind::InvalidData, format!("{}", err));

    for (id, seq) in blob.nodes.iter() {
        graph
            .create_handle(&seq[..], NodeId::from(*id))
            .map_err(bad_blob)?;
    }
    for &(l, r) in blob.edges.iter() {
        graph
            .create_edge(Edge(
                Handle::from_integer(l),
                Handle::from_integer(r),
            ))
            .map_err(bad_blob)?;
    }
    for (name, steps) in blob.paths.iter() {
        let p = graph.create_path_handle(name).map_err(bad_blob)?;
        for &s in steps.iter() {
            graph
                .append_step(p, Handle::from_integer(s))
                .map_err(bad_blob)?;
        }
    }
    info!(
        "loaded graph: {} nodes, {} edges, {} paths",
        graph.node_count(),
        graph.edge_count(),
        graph.path_count()
    );
    Ok(graph)
}

// ----- node access -----

pub fn get_node_count(graph: &DynGraph) -> usize {
    graph.node_count()
}

pub fn min_node_id(graph: &DynGraph) -> u64 {
    u64::from(graph.min_node_id())
}

pub fn max_node_id(graph: &DynGraph) -> u64 {
    u64::from(graph.max_node_id())
}

pub fn has_node(graph: &DynGraph, node_id: u64) -> bool {
    graph.has_node(NodeId::from(node_id))
}

pub fn get_id(graph: &DynGraph, handle: u64) -> u64 {
    let _ = graph;
    Handle::from_integer(handle).id().into()
}

pub fn get_is_reverse(graph: &DynGraph, handle: u64) -> bool {
    let _ = graph;
    Handle::from_integer(handle).is_reverse()
}

pub fn get_length(graph: &DynGraph, handle: u64) -> usize {
    graph
        .try_node_len(Handle::from_integer(handle))
        .unwrap_or(0)
}

pub fn get_sequence(graph: &DynGraph, handle: u64) -> Vec<u8> {
    graph
        .try_sequence(Handle::from_integer(handle))
        .unwrap_or_default()
}

// ----- iteration -----

pub fn for_each_handle<F>(graph: &DynGraph, mut next: F) -> bool
where
    F: FnMut(u64) -> bool,
{
    graph.for_each_handle(|h| next(h.as_integer()))
}

pub fn follow_edges<F>(
    graph: &DynGraph,
    handle: u64,
    go_left: bool,
    mut next: F,
) -> bool
where
    F: FnMut(u64) -> bool,
{
    graph.follow_edges(Handle::from_integer(handle), go_left, |h| {
        next(h.as_integer())
    })
}

pub fn for_each_edge<F>(graph: &DynGraph, mut next: F) -> bool
where
    F: FnMut(u64, u64) -> bool,
{
    graph.for_each_edge(|Edge(l, r)| next(l.as_integer(), r.as_integer()))
}

pub fn edge_first_handle(graph: &DynGraph, left: u64, right: u64) -> u64 {
    let _ = graph;
    let Edge(l, _) = Edge::edge_handle(
        Handle::from_integer(left),
        Handle::from_integer(right),
    );
    l.as_integer()
}

pub fn edge_second_handle(graph: &DynGraph, left: u64, right: u64) -> u64 {
    let _ = graph;
    let Edge(_, r) = Edge::edge_handle(
        Handle::from_integer(left),
        Handle::from_integer(right),
    );
    r.as_integer()
}

pub fn has_edge(graph: &DynGraph, left: u64, right: u64) -> bool {
    HandleGraph::has_edge(
        graph,
        Handle::from_integer(left),
        Handle::from_integer(right),
    )
}

// ----- paths -----

pub fn get_path_count(graph: &DynGraph) -> usize {
    graph.path_count()
}

pub fn has_path(graph: &DynGraph, path_name: &[u8]) -> bool {
    graph.has_path(path_name)
}

pub fn get_path_handle(graph: &DynGraph, path_name: &[u8]) -> Option<u64> {
    graph.name_to_path_handle(path_name).map(|p| p.0)
}

pub fn get_path_name(graph: &DynGraph, path: u64) -> Option<Vec<u8>> {
    graph.path_name(PathId(path)).ok()
}

pub fn path_is_empty(graph: &DynGraph, path: u64) -> bool {
    graph.path_is_empty(PathId(path)).unwrap_or(true)
}

pub fn for_each_path_handle<F>(graph: &DynGraph, mut next: F) -> bool
where
    F: FnMut(u64) -> bool,
{
    graph.for_each_path_handle(|p| next(p.0))
}

// ----- steps -----

pub fn get_step_count(graph: &DynGraph, handle: u64) -> usize {
    graph.step_count_on_handle(Handle::from_integer(handle))
}

pub fn step_get_handle(graph: &DynGraph, step: u128) -> Option<u64> {
    graph
        .handle_of_step(&PathStep::from_integer(step))
        .map(Handle::as_integer)
}

pub fn step_get_path(graph: &DynGraph, step: u128) -> u64 {
    graph.path_handle_of_step(&PathStep::from_integer(step)).0
}

pub fn step_path_begin(graph: &DynGraph, path: u64) -> Option<u128> {
    graph.path_begin(PathId(path)).ok().map(PathStep::as_integer)
}

pub fn step_path_end(graph: &DynGraph, path: u64) -> Option<u128> {
    graph.path_end(PathId(path)).ok().map(PathStep::as_integer)
}

pub fn step_path_back(graph: &DynGraph, path: u64) -> Option<u128> {
    graph.path_back(PathId(path)).ok().map(PathStep::as_integer)
}

pub fn path_front_end(graph: &DynGraph, path: u64) -> Option<u128> {
    graph
        .path_front_end(PathId(path))
        .ok()
        .map(PathStep::as_integer)
}

pub fn step_is_reverse(graph: &DynGraph, step: u128) -> bool {
    graph
        .step_is_reverse(&PathStep::from_integer(step))
        .unwrap_or(false)
}

pub fn is_path_front_end(graph: &DynGraph, step: u128) -> bool {
    let _ = graph;
    PathStep::from_integer(step).is_front()
}

pub fn is_path_end(graph: &DynGraph, step: u128) -> bool {
    let _ = graph;
    PathStep::from_integer(step).is_end()
}

pub fn has_next_step(graph: &DynGraph, step: u128) -> bool {
    graph.has_next_step(&PathStep::from_integer(step))
}

pub fn has_previous_step(graph: &DynGraph, step: u128) -> bool {
    graph.has_previous_step(&PathStep::from_integer(step))
}

pub fn get_next_step(graph: &DynGraph, step: u128) -> u128 {
    graph.next_step(&PathStep::from_integer(step)).as_integer()
}

pub fn get_previous_step(graph: &DynGraph, step: u128) -> u128 {
    graph
        .previous_step(&PathStep::from_integer(step))
        .as_integer()
}

pub fn get_path_handle_of_step(graph: &DynGraph, step: u128) -> u64 {
    graph.path_handle_of_step(&PathStep::from_integer(step)).0
}

pub fn step_eq(graph: &DynGraph, a: u128, b: u128) -> bool {
    let _ = graph;
    PathStep::from_integer(a) == PathStep::from_integer(b)
}

pub fn step_next_id(graph: &DynGraph, step: u128) -> Option<u64> {
    graph
        .next_step_id(&PathStep::from_integer(step))
        .map(u64::from)
}

pub fn step_next_rank(graph: &DynGraph, step: u128) -> Option<usize> {
    graph.next_step_rank(&PathStep::from_integer(step))
}

pub fn step_prev_id(graph: &DynGraph, step: u128) -> Option<u64> {
    graph
        .prev_step_id(&PathStep::from_integer(step))
        .map(u64::from)
}

pub fn step_prev_rank(graph: &DynGraph, step: u128) -> Option<usize> {
    graph.prev_step_rank(&PathStep::from_integer(step))
}

pub fn for_each_step_in_path<F>(graph: &DynGraph, path: u64, mut next: F) -> bool
where
    F: FnMut(u128) -> bool,
{
    graph.for_each_step_in_path(PathId(path), |s| next(s.as_integer()))
}

pub fn for_each_step_on_handle<F>(
    graph: &DynGraph,
    handle: u64,
    mut next: F,
) -> bool
where
    F: FnMut(u128) -> bool,
{
    graph
        .for_each_step_on_handle(Handle::from_integer(handle), |s| {
            next(s.as_integer())
        })
}
