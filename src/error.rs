/*!

The error type shared by all fallible graph operations.

Existence queries (`has_node`, `has_edge`, `has_path`, ...) return
plain booleans and never fail, and iterators never fail; everything
else that can go wrong surfaces one of these kinds synchronously at
the call site. Nothing is retried internally.

*/

use thiserror::Error;

use crate::handle::NodeId;
use crate::pathhandlegraph::PathId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The node id is not live in the graph.
    #[error("node {0} does not exist")]
    NoSuchNode(NodeId),

    /// The path id is not live in the graph.
    #[error("path {0} does not exist")]
    NoSuchPath(PathId),

    /// An explicit node id collided with a live node.
    #[error("node id {0} is already in use")]
    DuplicateId(NodeId),

    /// A path with the requested name already exists.
    #[error("a path named {0:?} already exists")]
    DuplicatePath(String),

    /// Path names must be nonempty printable ASCII without the `$`
    /// delimiter byte.
    #[error("{0:?} is not a legal path name")]
    InvalidName(String),

    /// A handle referred to an entity that has been invalidated.
    /// Detection is best-effort.
    #[error("handle refers to an entity that no longer exists")]
    InvalidHandle,

    /// The first or last step of an empty path was requested.
    #[error("path {0} is empty")]
    EmptyPath(PathId),

    /// A mutator was called during an iteration that forbids it.
    #[error("mutation is not allowed during this iteration")]
    IllegalMutation,
}
