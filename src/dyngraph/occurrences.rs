use crate::dynvec::{DynCollection, RankIntVec};
use crate::pathhandlegraph::PathId;

/// The per-base cross-index from sequence positions to path visits:
/// for every base of the sequence store, a 0-delimited list of
/// (path id, step rank) entries, both stored 1-based so the delimiter
/// stays unambiguous. A visit is recorded at the first base of the
/// visited node, so all entries within a node's base range belong to
/// that node.
#[derive(Debug, Clone, Default)]
pub struct StepIndex {
    pub(crate) path_ids: RankIntVec,
    pub(crate) ranks: RankIntVec,
}

impl StepIndex {
    /// The entry range `[start, end)` for `base`; the delimiter sits
    /// at `end`.
    fn region(&self, base: usize) -> (usize, usize) {
        let start = if base == 0 {
            0
        } else {
            self.path_ids
                .select(0, base - 1)
                .expect("step index out of sync with sequence store")
                + 1
        };
        let end = self
            .path_ids
            .select(0, base)
            .expect("step index out of sync with sequence store");
        (start, end)
    }

    /// Append the (empty) visit list for a new last base.
    pub(crate) fn add_base(&mut self) {
        self.path_ids.append(0);
        self.ranks.append(0);
    }

    /// Record a visit of `path` at `base` with the given step rank.
    pub(crate) fn add_entry(&mut self, base: usize, path: PathId, rank: usize) {
        let (start, _) = self.region(base);
        self.path_ids.insert(start, path.0 + 1);
        self.ranks.insert(start, rank as u64 + 1);
    }

    /// All visits recorded in the base range `[start_base, end_base)`.
    pub(crate) fn entries_in_bases(
        &self,
        start_base: usize,
        end_base: usize,
    ) -> Vec<(PathId, usize)> {
        if start_base >= end_base {
            return Vec::new();
        }
        let (lo, _) = self.region(start_base);
        let (_, hi) = self.region(end_base - 1);
        (lo..hi)
            .filter_map(|pos| {
                let id = self.path_ids.get(pos);
                if id == 0 {
                    None
                } else {
                    let rank = self.ranks.get(pos) - 1;
                    Some((PathId(id - 1), rank as usize))
                }
            })
            .collect()
    }

    /// The number of visits recorded in the base range.
    pub(crate) fn count_in_bases(
        &self,
        start_base: usize,
        end_base: usize,
    ) -> usize {
        if start_base >= end_base {
            return 0;
        }
        let (lo, _) = self.region(start_base);
        let (_, hi) = self.region(end_base - 1);
        (hi - lo) - (end_base - start_base - 1)
    }

    /// The raw (1-based) entry pairs stored for `base`, in stored
    /// order. Used when the backing stores are rebuilt.
    pub(crate) fn raw_entries(&self, base: usize) -> Vec<(u64, u64)> {
        let (start, end) = self.region(base);
        (start..end)
            .map(|pos| (self.path_ids.get(pos), self.ranks.get(pos)))
            .collect()
    }

    /// Strip every entry belonging to `path`.
    pub(crate) fn remove_path_entries(&mut self, path: PathId) {
        let target = path.0 + 1;
        let mut pos = 0;
        while pos < self.path_ids.len() {
            if self.path_ids.get(pos) == target {
                self.path_ids.remove(pos);
                self.ranks.remove(pos);
            } else {
                pos += 1;
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Default::default();
    }
}
