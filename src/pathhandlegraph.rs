/*!

Traits and types for accessing and manipulating the paths embedded in
a graph.

A step is addressed by its owning path and its 0-based rank along it,
with two sentinel positions per path: *front* (one before the first
step) and *end* (one past the last). The sentinels make step
navigation closed: walking off either end of a path lands on a
sentinel rather than failing.

*/

use crate::error::GraphError;
use crate::handle::{Handle, NodeId};

/// A unique identifier for a single path.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PathId(pub u64);

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sentinel rank denoting the front of a path in the packed integer
/// form of a step.
const FRONT_RANK: u64 = std::u64::MAX;
/// Sentinel rank denoting the end of a path in the packed integer
/// form of a step.
const END_RANK: u64 = std::u64::MAX - 1;

/// A step along a specific path: an oriented visit to a node,
/// identified by (path, rank), or one of the path's two sentinel
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathStep {
    /// One before the first step.
    Front(PathId),
    /// A real visit, by 0-based rank.
    Step(PathId, usize),
    /// One past the last step.
    End(PathId),
}

impl PathStep {
    #[inline]
    pub fn path_id(&self) -> PathId {
        match *self {
            PathStep::Front(p) => p,
            PathStep::Step(p, _) => p,
            PathStep::End(p) => p,
        }
    }

    /// The 0-based rank, if this is a real step.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        if let PathStep::Step(_, ix) = *self {
            Some(ix)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_front(&self) -> bool {
        matches!(self, PathStep::Front(_))
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, PathStep::End(_))
    }

    /// Pack the step into the 128-bit composite used across the
    /// foreign-call boundary: path id in the high word, rank in the
    /// low word, with the sentinels as the top two rank values.
    #[inline]
    pub fn as_integer(self) -> u128 {
        let (path, rank) = match self {
            PathStep::Front(p) => (p.0, FRONT_RANK),
            PathStep::End(p) => (p.0, END_RANK),
            PathStep::Step(p, ix) => (p.0, ix as u64),
        };
        ((path as u128) << 64) | rank as u128
    }

    /// Inverse of [`PathStep::as_integer`].
    #[inline]
    pub fn from_integer(i: u128) -> Self {
        let path = PathId((i >> 64) as u64);
        match i as u64 {
            FRONT_RANK => PathStep::Front(path),
            END_RANK => PathStep::End(path),
            rank => PathStep::Step(path, rank as usize),
        }
    }
}

/// Trait encapsulating the path-related aspects of a handlegraph,
/// both immutable and mutable.
pub trait PathHandleGraph {
    /// The number of live paths.
    fn path_count(&self) -> usize;

    fn has_path(&self, name: &[u8]) -> bool;

    /// Paths have byte-string names as well as handles
    fn name_to_path_handle(&self, name: &[u8]) -> Option<PathId>;

    fn path_name(&self, path: PathId) -> Result<Vec<u8>, GraphError>;

    /// The number of steps along the path
    fn path_len(&self, path: PathId) -> Result<usize, GraphError>;

    fn path_is_empty(&self, path: PathId) -> Result<bool, GraphError> {
        Ok(self.path_len(path)? == 0)
    }

    /// Get the (node) handle that a step handle points to. `None` for
    /// sentinels and for steps whose node has since been destroyed.
    fn handle_of_step(&self, step: &PathStep) -> Option<Handle>;

    fn path_handle_of_step(&self, step: &PathStep) -> PathId {
        step.path_id()
    }

    fn step_is_reverse(&self, step: &PathStep) -> Option<bool> {
        self.handle_of_step(step).map(|h| h.is_reverse())
    }

    /// The first step of the path, or the end sentinel if the path is
    /// empty.
    fn path_begin(&self, path: PathId) -> Result<PathStep, GraphError>;

    /// The past-the-last sentinel.
    fn path_end(&self, path: PathId) -> Result<PathStep, GraphError>;

    /// The last step of the path, or the front sentinel if the path
    /// is empty.
    fn path_back(&self, path: PathId) -> Result<PathStep, GraphError>;

    /// The before-the-first sentinel.
    fn path_front_end(&self, path: PathId) -> Result<PathStep, GraphError>;

    /// The first step; fails on an empty path.
    fn first_step(&self, path: PathId) -> Result<PathStep, GraphError> {
        if self.path_is_empty(path)? {
            return Err(GraphError::EmptyPath(path));
        }
        self.path_begin(path)
    }

    /// The last step; fails on an empty path.
    fn last_step(&self, path: PathId) -> Result<PathStep, GraphError> {
        if self.path_is_empty(path)? {
            return Err(GraphError::EmptyPath(path));
        }
        self.path_back(path)
    }

    /// The following position along the path; saturates at the end
    /// sentinel.
    fn next_step(&self, step: &PathStep) -> PathStep;

    /// The preceding position along the path; saturates at the front
    /// sentinel.
    fn previous_step(&self, step: &PathStep) -> PathStep;

    /// Whether a further real step exists after this position.
    fn has_next_step(&self, step: &PathStep) -> bool {
        matches!(self.next_step(step), PathStep::Step(..))
    }

    /// Whether a real step exists before this position.
    fn has_previous_step(&self, step: &PathStep) -> bool {
        matches!(self.previous_step(step), PathStep::Step(..))
    }

    /// The node id of the following step, without materializing a
    /// full step token.
    fn next_step_id(&self, step: &PathStep) -> Option<NodeId> {
        self.handle_of_step(&self.next_step(step)).map(|h| h.id())
    }

    /// The rank of the following step.
    fn next_step_rank(&self, step: &PathStep) -> Option<usize> {
        self.next_step(step).index()
    }

    /// The node id of the preceding step.
    fn prev_step_id(&self, step: &PathStep) -> Option<NodeId> {
        self.handle_of_step(&self.previous_step(step))
            .map(|h| h.id())
    }

    /// The rank of the preceding step.
    fn prev_step_rank(&self, step: &PathStep) -> Option<usize> {
        self.previous_step(step).index()
    }

    /// The number of steps, over all paths, that visit the node.
    fn step_count_on_handle(&self, handle: Handle) -> usize;

    /// Create a new empty path. Fails if the name is illegal or
    /// already taken; handles to other paths stay valid.
    fn create_path_handle(
        &mut self,
        name: &[u8],
    ) -> Result<PathId, GraphError>;

    /// Destroy the given path. Invalidates handles to the path and
    /// its steps.
    fn destroy_path(&mut self, path: PathId) -> Result<(), GraphError>;

    /// Append a visit to a node to the given path, returning the new
    /// final step. Handles to prior steps on the path, and to other
    /// paths, stay valid.
    fn append_step(
        &mut self,
        path: PathId,
        to_append: Handle,
    ) -> Result<PathStep, GraphError>;

    /// Prepend a visit to a node to the given path, returning the new
    /// first step. The ranks of all existing steps on the path shift
    /// up by one, invalidating step handles into it.
    fn prepend_step(
        &mut self,
        path: PathId,
        to_prepend: Handle,
    ) -> Result<PathStep, GraphError>;

    /// Iterator over all live path ids, in creation order
    fn paths_iter<'a>(&'a self) -> Box<dyn Iterator<Item = PathId> + 'a>;

    /// Iterator over the steps of a path, in rank order
    fn steps_iter<'a>(
        &'a self,
        path: PathId,
    ) -> Box<dyn Iterator<Item = PathStep> + 'a>;

    /// Iterator over all the steps, across all paths, that visit the
    /// given node
    fn occurrences_iter<'a>(
        &'a self,
        handle: Handle,
    ) -> Box<dyn Iterator<Item = PathStep> + 'a>;

    /// Loop over all live paths, in creation order, with the
    /// stop-on-`false` contract.
    fn for_each_path_handle<F>(&self, mut iteratee: F) -> bool
    where
        Self: Sized,
        F: FnMut(PathId) -> bool,
    {
        for p in self.paths_iter() {
            if !iteratee(p) {
                return false;
            }
        }
        true
    }

    /// Loop over the steps of a path in rank order.
    fn for_each_step_in_path<F>(&self, path: PathId, mut iteratee: F) -> bool
    where
        Self: Sized,
        F: FnMut(PathStep) -> bool,
    {
        for s in self.steps_iter(path) {
            if !iteratee(s) {
                return false;
            }
        }
        true
    }

    /// Loop over the steps on a node, across all paths.
    fn for_each_step_on_handle<F>(
        &self,
        handle: Handle,
        mut iteratee: F,
    ) -> bool
    where
        Self: Sized,
        F: FnMut(PathStep) -> bool,
    {
        for s in self.occurrences_iter(handle) {
            if !iteratee(s) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_integer_roundtrip() {
        let p = PathId(42);
        for step in [
            PathStep::Front(p),
            PathStep::Step(p, 0),
            PathStep::Step(p, 1234567),
            PathStep::End(p),
        ]
        .iter()
        {
            assert_eq!(PathStep::from_integer(step.as_integer()), *step);
        }
    }

    #[test]
    fn step_integer_layout() {
        let step = PathStep::Step(PathId(3), 9);
        let i = step.as_integer();
        assert_eq!((i >> 64) as u64, 3);
        assert_eq!(i as u64, 9);
    }
}
