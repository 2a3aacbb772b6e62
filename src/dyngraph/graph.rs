use fnv::{FnvHashMap, FnvHashSet};

#[allow(unused_imports)]
use log::{debug, info, trace};

use crate::dynvec::{DynCollection, IndexedBitVec, PackedIntVec};
use crate::error::GraphError;
use crate::handle::{Direction, Edge, Handle, NodeId};
use crate::pathhandlegraph::{PathId, PathStep};
use crate::util::dna;

use super::edges::EdgeLists;
use super::nodes::{
    NodeRecords, DEAD_RECLAIMABLE, DEAD_REFERENCED, TOMBSTONE,
};
use super::occurrences::StepIndex;
use super::paths::PathRecords;

/// Compaction runs once this fraction of the stored bases is
/// reclaimable.
const COMPACT_DIVISOR: usize = 4;

/// The succinct dynamic graph store: nodes, edges, per-base path
/// cross-index, and the embedded paths, all over dynamic indexed
/// vectors. Mutators keep the public identifiers stable; internal
/// slots may move (compaction, swaps) without invalidating handles,
/// as nodes are addressed by id.
#[derive(Debug, Clone, Default)]
pub struct DynGraph {
    pub(crate) nodes: NodeRecords,
    pub(crate) edges: EdgeLists,
    pub(crate) occurrences: StepIndex,
    pub(crate) paths: PathRecords,
}

impl DynGraph {
    pub fn new() -> Self {
        Default::default()
    }

    pub(crate) fn require_slot(&self, id: NodeId) -> Result<usize, GraphError> {
        self.nodes.slot_of(id).ok_or(GraphError::NoSuchNode(id))
    }

    /// The adjacency list that holds the edges one traverses by going
    /// rightward from `handle`.
    pub(crate) fn out_dir(handle: Handle) -> Direction {
        if handle.is_reverse() {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// The neighbors of `handle` in the given direction, in stored
    /// order. A left neighbor `p` is presented so that the edge reads
    /// `p -> handle`.
    pub(crate) fn neighbors_vec(
        &self,
        handle: Handle,
        dir: Direction,
    ) -> Result<Vec<Handle>, GraphError> {
        let slot = self.require_slot(handle.id())?;
        let neighbors = match dir {
            Direction::Right => self
                .edges
                .entries(Self::out_dir(handle), slot)
                .into_iter()
                .map(|(id, inv)| Handle::pack(id, inv))
                .collect(),
            Direction::Left => self
                .edges
                .entries(Self::out_dir(handle.flip()), slot)
                .into_iter()
                .map(|(id, inv)| Handle::pack(id, !inv))
                .collect(),
        };
        Ok(neighbors)
    }

    /// The node's sequence in the handle's orientation; fails on
    /// handles to destroyed nodes.
    pub fn try_sequence(&self, handle: Handle) -> Result<Vec<u8>, GraphError> {
        let slot = self.require_slot(handle.id())?;
        let seq = self.nodes.visible_sequence(slot);
        if handle.is_reverse() {
            Ok(dna::rev_comp(&seq))
        } else {
            Ok(seq)
        }
    }

    /// The node's visible length; fails on handles to destroyed
    /// nodes.
    pub fn try_node_len(&self, handle: Handle) -> Result<usize, GraphError> {
        let slot = self.require_slot(handle.id())?;
        Ok(self.nodes.visible_len(slot))
    }

    // ----- node and edge mutation -----

    pub(crate) fn create_handle_impl(
        &mut self,
        sequence: &[u8],
        node_id: Option<NodeId>,
    ) -> Result<Handle, GraphError> {
        assert!(!sequence.is_empty(), "node sequences may not be empty");
        let id = node_id.unwrap_or_else(|| NodeId::from(self.nodes.max_id + 1));
        assert!(!id.is_zero(), "node id 0 is reserved");
        if self.nodes.has_node(id) {
            return Err(GraphError::DuplicateId(id));
        }

        self.nodes.append_node(id, sequence);
        self.edges.add_slot();
        for _ in 0..sequence.len() {
            self.occurrences.add_base();
        }
        trace!("created node {} with {} bases", id, sequence.len());
        Ok(Handle::pack(id, false))
    }

    pub(crate) fn create_edge_impl(
        &mut self,
        Edge(left, right): Edge,
    ) -> Result<(), GraphError> {
        let left_slot = self.require_slot(left.id())?;
        let right_slot = self.require_slot(right.id())?;

        let left_dir = Self::out_dir(left);
        if self
            .edges
            .contains(left_dir, left_slot, right.id(), right.is_reverse())
        {
            return Ok(());
        }

        self.edges
            .insert_entry(left_dir, left_slot, right.id(), right.is_reverse());
        // a reversing self-loop's two representations coincide; store
        // the mirror entry for everything else
        if left != right.flip() {
            let right_dir = Self::out_dir(right.flip());
            self.edges.insert_entry(
                right_dir,
                right_slot,
                left.id(),
                !left.is_reverse(),
            );
        }
        self.edges.edge_count += 1;
        trace!("created edge {} -> {}", left, right);
        Ok(())
    }

    pub(crate) fn destroy_edge_impl(
        &mut self,
        Edge(left, right): Edge,
    ) -> Result<(), GraphError> {
        let slots = (
            self.nodes.slot_of(left.id()),
            self.nodes.slot_of(right.id()),
        );
        let (left_slot, right_slot) = match slots {
            (Some(l), Some(r)) => (l, r),
            // a missing endpoint means a missing edge
            _ => return Ok(()),
        };

        let removed = self.edges.remove_entry(
            Self::out_dir(left),
            left_slot,
            right.id(),
            right.is_reverse(),
        );
        if removed {
            if left != right.flip() {
                self.edges.remove_entry(
                    Self::out_dir(right.flip()),
                    right_slot,
                    left.id(),
                    !left.is_reverse(),
                );
            }
            self.edges.edge_count -= 1;
            trace!("destroyed edge {} -> {}", left, right);
        }
        Ok(())
    }

    /// Every edge incident to the node, as canonical pairs, each
    /// exactly once.
    fn incident_edges(&self, id: NodeId) -> Result<Vec<Edge>, GraphError> {
        let handle = Handle::pack(id, false);
        let mut seen: FnvHashSet<Edge> = FnvHashSet::default();
        let mut result = Vec::new();
        for next in self.neighbors_vec(handle, Direction::Right)? {
            let edge = Edge::edge_handle(handle, next);
            if seen.insert(edge) {
                result.push(edge);
            }
        }
        for prev in self.neighbors_vec(handle, Direction::Left)? {
            let edge = Edge::edge_handle(prev, handle);
            if seen.insert(edge) {
                result.push(edge);
            }
        }
        Ok(result)
    }

    pub(crate) fn destroy_handle_impl(
        &mut self,
        handle: Handle,
    ) -> Result<(), GraphError> {
        let id = handle.id();
        let slot = self.require_slot(id)?;

        for edge in self.incident_edges(id)? {
            self.destroy_edge_impl(edge)?;
        }

        let (start, end) = self.nodes.seq_range(slot);
        let referenced = self.occurrences.count_in_bases(start, end) > 0;
        let state = if referenced {
            DEAD_REFERENCED
        } else {
            DEAD_RECLAIMABLE
        };
        self.nodes.dead.set_range(start, end, state);
        self.nodes.ids.set(slot, TOMBSTONE);
        self.nodes.node_count -= 1;
        debug!(
            "destroyed node {} ({} bases, still referenced: {})",
            id,
            end - start,
            referenced
        );
        self.maybe_compact();
        Ok(())
    }

    pub(crate) fn clear_impl(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.occurrences.clear();
        self.paths.clear();
        info!("cleared graph");
    }

    pub(crate) fn divide_handle_impl(
        &mut self,
        handle: Handle,
        offsets: &[usize],
    ) -> Result<Vec<Handle>, GraphError> {
        let id = handle.id();
        let slot = self.require_slot(id)?;
        let (start, end) = self.nodes.seq_range(slot);
        let node_len = end - start;

        // offsets come in the handle's orientation
        let mut cuts: Vec<usize> = offsets
            .iter()
            .map(|&o| {
                if handle.is_reverse() {
                    node_len.saturating_sub(o)
                } else {
                    o
                }
            })
            .filter(|&o| o > 0 && o < node_len)
            .collect();
        cuts.sort_unstable();
        cuts.dedup();

        if cuts.is_empty() {
            return Ok(vec![handle]);
        }
        let k = cuts.len();

        // detach the incident edges while the node is reshaped
        let incident = self.incident_edges(id)?;
        for edge in incident.iter() {
            self.destroy_edge_impl(*edge)?;
        }

        // split the slot in place: boundary bits at the cut points,
        // fresh ids and empty adjacency segments for the new pieces
        let first_new_id = self.nodes.max_id + 1;
        for (j, &cut) in cuts.iter().enumerate() {
            self.nodes.ids.insert(slot + 1 + j, first_new_id + j as u64);
            self.nodes.boundary.set(start + cut, true);
            self.edges.insert_slot(slot + 1 + j);
        }
        self.nodes.max_id += k as u64;
        self.nodes.node_count += k;

        let mut pieces = Vec::with_capacity(k + 1);
        pieces.push(Handle::pack(id, false));
        for j in 0..k {
            pieces
                .push(Handle::pack(NodeId::from(first_new_id + j as u64), false));
        }
        let last = *pieces.last().unwrap();

        // piece geometry, in forward orientation
        let mut piece_starts = Vec::with_capacity(k + 1);
        let mut piece_lens = Vec::with_capacity(k + 1);
        let mut prev = 0;
        for &cut in cuts.iter().chain(std::iter::once(&node_len)) {
            piece_starts.push(start + prev);
            piece_lens.push(cut - prev);
            prev = cut;
        }

        // chain the pieces left to right
        for window in pieces.windows(2) {
            self.create_edge_impl(Edge(window[0], window[1]))?;
        }

        // re-attach the detached edges; the node's old right end now
        // belongs to the last piece, its left end stays with the first
        for Edge(l, r) in incident {
            let l = if l.id() == id && !l.is_reverse() {
                Handle::pack(last.id(), false)
            } else {
                l
            };
            let r = if r.id() == id && r.is_reverse() {
                Handle::pack(last.id(), true)
            } else {
                r
            };
            self.create_edge_impl(Edge(l, r))?;
        }

        // every visit to the node becomes k+1 consecutive visits; a
        // reversed visit walks the pieces right to left
        let affected: Vec<PathId> = self
            .paths
            .live_ids()
            .filter(|&p| {
                self.paths.records[p.0 as usize]
                    .starts
                    .iter()
                    .any(|s| s == start as u64)
            })
            .collect();

        for &path in affected.iter() {
            let record = &self.paths.records[path.0 as usize];
            let mut new_starts = PackedIntVec::new();
            let mut new_lens = PackedIntVec::new();
            let mut new_orients = IndexedBitVec::new();
            for ix in 0..record.len() {
                let st = record.starts.get(ix);
                let ln = record.lens.get(ix);
                let rev = record.orients.get(ix);
                if st == start as u64 {
                    let order: Box<dyn Iterator<Item = usize>> = if rev {
                        Box::new((0..=k).rev())
                    } else {
                        Box::new(0..=k)
                    };
                    for q in order {
                        new_starts.append(piece_starts[q] as u64);
                        new_lens.append(piece_lens[q] as u64);
                        new_orients.append(rev);
                    }
                } else {
                    new_starts.append(st);
                    new_lens.append(ln);
                    new_orients.append(rev);
                }
            }
            let record = &mut self.paths.records[path.0 as usize];
            record.starts = new_starts;
            record.lens = new_lens;
            record.orients = new_orients;
        }
        for &path in affected.iter() {
            self.rebuild_path_occurrences(path);
        }

        debug!("divided node {} into {} pieces", id, k + 1);

        // returned handles come in the input handle's orientation
        if handle.is_reverse() {
            pieces.reverse();
            for piece in pieces.iter_mut() {
                *piece = piece.flip();
            }
        }
        Ok(pieces)
    }

    pub(crate) fn apply_orientation_impl(
        &mut self,
        handle: Handle,
    ) -> Result<Handle, GraphError> {
        let id = handle.id();
        let slot = self.require_slot(id)?;
        if !handle.is_reverse() {
            return Ok(handle);
        }

        let incident = self.incident_edges(id)?;
        for edge in incident.iter() {
            self.destroy_edge_impl(*edge)?;
        }

        // reverse-complement the stored sequence in place
        let (start, end) = self.nodes.seq_range(slot);
        let bases: Vec<u8> =
            (start..end).map(|pos| self.nodes.seq.get(pos) as u8).collect();
        for (ix, base) in dna::rev_comp_iter(bases).enumerate() {
            self.nodes.seq.set(start + ix, base as u64);
        }

        // flip the strand of every step on the node
        for (path, rank) in self.occurrences.entries_in_bases(start, end) {
            let record = &mut self.paths.records[path.0 as usize];
            let flipped = !record.orients.get(rank);
            record.orients.set(rank, flipped);
        }

        // re-attach the edges with the node's orientation flipped
        for Edge(l, r) in incident {
            let l = if l.id() == id { l.flip() } else { l };
            let r = if r.id() == id { r.flip() } else { r };
            self.create_edge_impl(Edge(l, r))?;
        }

        debug!("reversed the stored orientation of node {}", id);
        Ok(Handle::pack(id, false))
    }

    pub(crate) fn swap_handles_impl(
        &mut self,
        a: Handle,
        b: Handle,
    ) -> Result<(), GraphError> {
        let slot_a = self.require_slot(a.id())?;
        let slot_b = self.require_slot(b.id())?;
        if slot_a == slot_b {
            return Ok(());
        }
        let mut order: Vec<usize> = (0..self.nodes.slot_count()).collect();
        order.swap(slot_a, slot_b);
        self.rebuild_slots(&order);
        trace!("swapped slots of nodes {} and {}", a.id(), b.id());
        Ok(())
    }

    // ----- compaction and slot rebuilding -----

    /// Reclaim fully-unreferenced dead bases together with their
    /// slots. Invisible to the public interface: nodes are addressed
    /// by id, and the id-to-slot mapping is re-derived.
    pub fn compact(&mut self) {
        let slot_count = self.nodes.slot_count();
        let keep: Vec<usize> = (0..slot_count)
            .filter(|&slot| {
                let (start, end) = self.nodes.seq_range(slot);
                self.nodes.dead.count_in_range(DEAD_RECLAIMABLE, start, end)
                    < end - start
            })
            .collect();
        if keep.len() == slot_count {
            return;
        }
        info!(
            "compaction reclaiming {} of {} slots",
            slot_count - keep.len(),
            slot_count
        );
        self.rebuild_slots(&keep);
    }

    fn maybe_compact(&mut self) {
        let reclaimable = self.nodes.dead.count(DEAD_RECLAIMABLE);
        if reclaimable > 0
            && reclaimable * COMPACT_DIVISOR >= self.nodes.seq.len()
        {
            self.compact();
        }
    }

    /// Rewrite every slot-aligned and base-aligned store so that the
    /// slots appear in `order`; slots left out are dropped. Path
    /// starts are remapped through the relocation, so step tokens and
    /// node handles survive.
    fn rebuild_slots(&mut self, order: &[usize]) {
        struct BaseData {
            base: u64,
            dead: u64,
            visits: Vec<(u64, u64)>,
        }
        struct SlotData {
            id: u64,
            bases: Vec<BaseData>,
            fwd: Vec<(NodeId, bool)>,
            rev: Vec<(NodeId, bool)>,
        }

        let slot_count = self.nodes.slot_count();
        let mut slots = Vec::with_capacity(slot_count);
        let mut old_slot_of_start: FnvHashMap<u64, usize> =
            FnvHashMap::default();

        for slot in 0..slot_count {
            let (start, end) = self.nodes.seq_range(slot);
            old_slot_of_start.insert(start as u64, slot);
            let mut bases = Vec::with_capacity(end - start);
            for pos in start..end {
                bases.push(BaseData {
                    base: self.nodes.seq.get(pos),
                    dead: self.nodes.dead.get(pos),
                    visits: self.occurrences.raw_entries(pos),
                });
            }
            slots.push(SlotData {
                id: self.nodes.ids.get(slot),
                bases,
                fwd: self.edges.entries(Direction::Right, slot),
                rev: self.edges.entries(Direction::Left, slot),
            });
        }

        self.nodes.ids.clear();
        self.nodes.seq.clear();
        self.nodes.boundary.clear();
        self.nodes.dead.clear();
        self.edges.fwd.clear();
        self.edges.fwd_inv.clear();
        self.edges.rev.clear();
        self.edges.rev_inv.clear();
        self.occurrences.clear();

        let mut new_start_of_old: FnvHashMap<usize, usize> =
            FnvHashMap::default();
        for &old_slot in order {
            let data = &slots[old_slot];
            new_start_of_old.insert(old_slot, self.nodes.seq.len());
            self.nodes.ids.append(data.id);
            for (ix, base) in data.bases.iter().enumerate() {
                self.nodes.seq.append(base.base);
                self.nodes.boundary.append(ix == 0);
                self.nodes.dead.append(base.dead);
                for &(path_id, rank) in base.visits.iter() {
                    self.occurrences.path_ids.append(path_id);
                    self.occurrences.ranks.append(rank);
                }
                self.occurrences.path_ids.append(0);
                self.occurrences.ranks.append(0);
            }
            for &(neighbor, inv) in data.fwd.iter() {
                self.edges.fwd.append(u64::from(neighbor));
                self.edges.fwd_inv.append(inv);
            }
            self.edges.fwd.append(0);
            self.edges.fwd_inv.append(false);
            for &(neighbor, inv) in data.rev.iter() {
                self.edges.rev.append(u64::from(neighbor));
                self.edges.rev_inv.append(inv);
            }
            self.edges.rev.append(0);
            self.edges.rev_inv.append(false);
        }

        // route the path starts through the relocation
        let live: Vec<PathId> = self.paths.live_ids().collect();
        for path in live {
            let record = &mut self.paths.records[path.0 as usize];
            for ix in 0..record.len() {
                let old_start = record.starts.get(ix);
                let old_slot = *old_slot_of_start
                    .get(&old_start)
                    .expect("path start does not sit on a node boundary");
                let new_start = *new_start_of_old
                    .get(&old_slot)
                    .expect("path references a reclaimed node");
                record.starts.set(ix, new_start as u64);
            }
        }
    }

    // ----- paths -----

    /// The start base and visible length of the node behind `handle`.
    fn node_anchor(&self, handle: Handle) -> Result<(usize, usize), GraphError> {
        let slot = self.require_slot(handle.id())?;
        let (start, _) = self.nodes.seq_range(slot);
        Ok((start, self.nodes.visible_len(slot)))
    }

    pub(crate) fn append_step_impl(
        &mut self,
        path: PathId,
        handle: Handle,
    ) -> Result<PathStep, GraphError> {
        let (start, len) = self.node_anchor(handle)?;
        let record = self.paths.record_mut(path)?;
        let rank = record.len();
        record.starts.append(start as u64);
        record.lens.append(len as u64);
        record.orients.append(handle.is_reverse());
        self.occurrences.add_entry(start, path, rank);
        trace!("appended step {} of path {}: {}", rank, path, handle);
        Ok(PathStep::Step(path, rank))
    }

    pub(crate) fn prepend_step_impl(
        &mut self,
        path: PathId,
        handle: Handle,
    ) -> Result<PathStep, GraphError> {
        let (start, len) = self.node_anchor(handle)?;
        let record = self.paths.record_mut(path)?;
        record.starts.insert(0, start as u64);
        record.lens.insert(0, len as u64);
        record.orients.insert(0, handle.is_reverse());
        // every rank on the path moved up by one
        self.rebuild_path_occurrences(path);
        Ok(PathStep::Step(path, 0))
    }

    fn rebuild_path_occurrences(&mut self, path: PathId) {
        self.occurrences.remove_path_entries(path);
        let starts: Vec<u64> =
            self.paths.records[path.0 as usize].starts.iter().collect();
        for (rank, start) in starts.into_iter().enumerate() {
            self.occurrences.add_entry(start as usize, path, rank);
        }
    }

    pub(crate) fn destroy_path_impl(
        &mut self,
        path: PathId,
    ) -> Result<(), GraphError> {
        let starts: Vec<u64> = self.paths.record(path)?.starts.iter().collect();
        {
            let record = self.paths.record_mut(path)?;
            record.deleted = true;
            record.starts.clear();
            record.lens.clear();
            record.orients.clear();
        }
        self.paths.names.remove_by_id(path.0);
        self.paths.path_count -= 1;
        self.occurrences.remove_path_entries(path);

        // bases whose last referencing path this was become
        // reclaimable
        let mut seen: FnvHashSet<usize> = FnvHashSet::default();
        for start in starts {
            let slot = self.nodes.slot_of_base(start as usize);
            if !seen.insert(slot) {
                continue;
            }
            if self.nodes.ids.get(slot) != TOMBSTONE {
                continue;
            }
            let (s, e) = self.nodes.seq_range(slot);
            if self.occurrences.count_in_bases(s, e) == 0 {
                self.nodes.dead.set_range(s, e, DEAD_RECLAIMABLE);
            }
        }
        debug!("destroyed path {}", path);
        self.maybe_compact();
        Ok(())
    }

    pub(crate) fn step_handle(&self, step: &PathStep) -> Option<Handle> {
        let ix = step.index()?;
        let record = self.paths.record(step.path_id()).ok()?;
        if ix >= record.len() {
            return None;
        }
        let start = record.starts.get(ix) as usize;
        let slot = self.nodes.slot_of_base(start);
        let id = self.nodes.ids.get(slot);
        if id == TOMBSTONE {
            return None;
        }
        Some(Handle::pack(NodeId::from(id), record.orients.get(ix)))
    }

    pub(crate) fn path_len_or_zero(&self, path: PathId) -> usize {
        self.paths.record(path).map(|r| r.len()).unwrap_or(0)
    }

    /// The DNA sequence spelled by walking the path front to back.
    /// Steps whose node has been destroyed contribute nothing.
    pub fn path_sequence(&self, path: PathId) -> Result<Vec<u8>, GraphError> {
        let len = self.paths.record(path)?.len();
        let mut sequence = Vec::new();
        for ix in 0..len {
            if let Some(handle) = self.step_handle(&PathStep::Step(path, ix)) {
                sequence.extend(self.try_sequence(handle)?);
            }
        }
        Ok(sequence)
    }

    pub(crate) fn steps_on_handle_vec(&self, handle: Handle) -> Vec<PathStep> {
        match self.nodes.slot_of(handle.id()) {
            None => Vec::new(),
            Some(slot) => {
                let (start, end) = self.nodes.seq_range(slot);
                self.occurrences
                    .entries_in_bases(start, end)
                    .into_iter()
                    .map(|(path, rank)| PathStep::Step(path, rank))
                    .collect()
            }
        }
    }

    pub(crate) fn step_count_on_handle_impl(&self, handle: Handle) -> usize {
        match self.nodes.slot_of(handle.id()) {
            None => 0,
            Some(slot) => {
                let (start, end) = self.nodes.seq_range(slot);
                self.occurrences.count_in_bases(start, end)
            }
        }
    }
}
