use crate::dynvec::{DynCollection, IndexedBitVec, RankIntVec};
use crate::handle::{Direction, NodeId};

/// The edge store: one 0-terminated adjacency segment per node slot,
/// in slot order, in each direction. `Direction::Right` lists the
/// successors reachable by leaving the node's right end on the
/// forward strand; `Direction::Left` the successors reachable by
/// leaving its left end (equivalently, rightward from the reverse
/// handle). Entries are neighbour node ids, with a parallel bit
/// marking entries whose neighbour is entered on the reverse strand.
///
/// Every edge is stored once on each endpoint, except a reversing
/// self-loop, whose two representations coincide.
#[derive(Debug, Clone, Default)]
pub struct EdgeLists {
    pub(crate) fwd: RankIntVec,
    pub(crate) fwd_inv: IndexedBitVec,
    pub(crate) rev: RankIntVec,
    pub(crate) rev_inv: IndexedBitVec,
    pub(crate) edge_count: usize,
}

impl EdgeLists {
    fn list(&self, dir: Direction) -> (&RankIntVec, &IndexedBitVec) {
        match dir {
            Direction::Right => (&self.fwd, &self.fwd_inv),
            Direction::Left => (&self.rev, &self.rev_inv),
        }
    }

    fn list_mut(
        &mut self,
        dir: Direction,
    ) -> (&mut RankIntVec, &mut IndexedBitVec) {
        match dir {
            Direction::Right => (&mut self.fwd, &mut self.fwd_inv),
            Direction::Left => (&mut self.rev, &mut self.rev_inv),
        }
    }

    /// The entry range `[start, end)` of the slot's segment; the
    /// terminator sits at `end`.
    fn seg_bounds(&self, dir: Direction, slot: usize) -> (usize, usize) {
        let (list, _) = self.list(dir);
        let start = if slot == 0 {
            0
        } else {
            list.select(0, slot - 1)
                .expect("edge segment out of sync with node slots")
                + 1
        };
        let end = list
            .select(0, slot)
            .expect("edge segment out of sync with node slots");
        (start, end)
    }

    /// Append the (empty) segment for a new last slot.
    pub(crate) fn add_slot(&mut self) {
        self.fwd.append(0);
        self.fwd_inv.append(false);
        self.rev.append(0);
        self.rev_inv.append(false);
    }

    /// Insert an empty segment so that it becomes slot `at_slot`,
    /// shifting the segments of later slots up.
    pub(crate) fn insert_slot(&mut self, at_slot: usize) {
        for dir in [Direction::Right, Direction::Left].iter() {
            let pos = {
                let (list, _) = self.list(*dir);
                let slots = list.count(0);
                assert!(at_slot <= slots);
                if at_slot == slots {
                    list.len()
                } else if at_slot == 0 {
                    0
                } else {
                    list.select(0, at_slot - 1).unwrap() + 1
                }
            };
            let (list, inv) = self.list_mut(*dir);
            list.insert(pos, 0);
            inv.insert(pos, false);
        }
    }

    /// The entries of the slot's segment, in stored order.
    pub(crate) fn entries(
        &self,
        dir: Direction,
        slot: usize,
    ) -> Vec<(NodeId, bool)> {
        let (start, end) = self.seg_bounds(dir, slot);
        let (list, inv) = self.list(dir);
        (start..end)
            .map(|pos| (NodeId::from(list.get(pos)), inv.get(pos)))
            .collect()
    }

    pub(crate) fn degree(&self, dir: Direction, slot: usize) -> usize {
        let (start, end) = self.seg_bounds(dir, slot);
        end - start
    }

    pub(crate) fn contains(
        &self,
        dir: Direction,
        slot: usize,
        neighbor: NodeId,
        inverted: bool,
    ) -> bool {
        self.entries(dir, slot)
            .into_iter()
            .any(|e| e == (neighbor, inverted))
    }

    /// Insert an entry at the head of the slot's segment.
    pub(crate) fn insert_entry(
        &mut self,
        dir: Direction,
        slot: usize,
        neighbor: NodeId,
        inverted: bool,
    ) {
        let (start, _) = self.seg_bounds(dir, slot);
        let (list, inv) = self.list_mut(dir);
        list.insert(start, u64::from(neighbor));
        inv.insert(start, inverted);
    }

    /// Remove the first matching entry from the slot's segment;
    /// returns whether one was found.
    pub(crate) fn remove_entry(
        &mut self,
        dir: Direction,
        slot: usize,
        neighbor: NodeId,
        inverted: bool,
    ) -> bool {
        let (start, end) = self.seg_bounds(dir, slot);
        let pos = {
            let (list, inv) = self.list(dir);
            (start..end).find(|&p| {
                list.get(p) == u64::from(neighbor) && inv.get(p) == inverted
            })
        };
        match pos {
            None => false,
            Some(p) => {
                let (list, inv) = self.list_mut(dir);
                list.remove(p);
                inv.remove(p);
                true
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Default::default();
    }
}
