use crate::dynvec::{DynCollection, IndexedBitVec, RankIntVec, RunLengthVec};
use crate::handle::NodeId;

/// The symbol marking a deleted slot in the id string.
pub(crate) const TOMBSTONE: u64 = 0;

/// Tombstone states for the per-base dead string.
pub(crate) const LIVE: u64 = 0;
/// Deleted from the public topology but still referenced by a path.
pub(crate) const DEAD_REFERENCED: u64 = 1;
/// Unreferenced; reclaimable by the next compaction.
pub(crate) const DEAD_RECLAIMABLE: u64 = 2;

/// The node store: an id string in internal slot order, the
/// concatenation of all node sequences, a boundary bitmap marking
/// each node's first base, and the tombstone string tracking deleted
/// bases until compaction reclaims them.
///
/// A slot survives its node's destruction for as long as any path
/// still references the node; the id string holds [`TOMBSTONE`] for
/// such slots and their bases are marked [`DEAD_REFERENCED`].
#[derive(Debug, Clone, Default)]
pub struct NodeRecords {
    pub(crate) ids: RankIntVec,
    pub(crate) seq: RankIntVec,
    pub(crate) boundary: IndexedBitVec,
    pub(crate) dead: RunLengthVec,
    pub(crate) min_id: u64,
    pub(crate) max_id: u64,
    pub(crate) node_count: usize,
}

impl NodeRecords {
    /// All slots, live and tombstoned.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.ids.len()
    }

    /// The slot of a live node, found through the id string.
    pub(crate) fn slot_of(&self, id: NodeId) -> Option<usize> {
        let id = u64::from(id);
        if id == TOMBSTONE {
            return None;
        }
        self.ids.select(id, 0)
    }

    #[inline]
    pub(crate) fn has_node(&self, id: NodeId) -> bool {
        self.slot_of(id).is_some()
    }

    /// The base range `[start, end)` of the slot's sequence,
    /// tombstoned bases included.
    pub(crate) fn seq_range(&self, slot: usize) -> (usize, usize) {
        let start = self
            .boundary
            .select1(slot)
            .expect("node slot out of sync with boundary bitmap");
        let end = self
            .boundary
            .select1(slot + 1)
            .unwrap_or_else(|| self.seq.len());
        (start, end)
    }

    /// The slot whose sequence contains base `pos`.
    #[inline]
    pub(crate) fn slot_of_base(&self, pos: usize) -> usize {
        self.boundary.rank1(pos + 1) - 1
    }

    /// The node's visible length: its base range minus tombstoned
    /// positions.
    pub(crate) fn visible_len(&self, slot: usize) -> usize {
        let (start, end) = self.seq_range(slot);
        self.dead.count_in_range(LIVE, start, end)
    }

    /// The node's visible sequence in forward orientation.
    pub(crate) fn visible_sequence(&self, slot: usize) -> Vec<u8> {
        let (start, end) = self.seq_range(slot);
        (start..end)
            .filter(|&pos| self.dead.get(pos) == LIVE)
            .map(|pos| self.seq.get(pos) as u8)
            .collect()
    }

    /// Append a new node as the last slot. The caller is responsible
    /// for id uniqueness.
    pub(crate) fn append_node(&mut self, id: NodeId, sequence: &[u8]) {
        let id = u64::from(id);
        self.ids.append(id);
        for (ix, &base) in sequence.iter().enumerate() {
            self.seq.append(base as u64);
            self.boundary.append(ix == 0);
        }
        self.dead.append_run(LIVE, sequence.len());

        if self.min_id == 0 || id < self.min_id {
            self.min_id = id;
        }
        self.max_id = self.max_id.max(id);
        self.node_count += 1;
    }

    pub(crate) fn clear(&mut self) {
        *self = Default::default();
    }
}
