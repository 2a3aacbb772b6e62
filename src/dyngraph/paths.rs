use crate::dynvec::{DynCollection, IndexedBitVec, NameVec, PackedIntVec};
use crate::error::GraphError;
use crate::pathhandlegraph::PathId;

/// One embedded path: three parallel dense arrays over its steps.
/// `starts[i]` is the sequence-store offset of the i-th visited
/// node's first base, `lens[i]` the visit length, and `orients[i]` is
/// set for reverse-strand visits. Destroyed paths keep their slot in
/// the record table (ids are never reused) with the arrays emptied.
#[derive(Debug, Clone, Default)]
pub struct PathRecord {
    pub(crate) starts: PackedIntVec,
    pub(crate) lens: PackedIntVec,
    pub(crate) orients: IndexedBitVec,
    pub(crate) deleted: bool,
}

impl PathRecord {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.starts.len()
    }
}

/// The path store: records in creation order plus the name index.
#[derive(Debug, Clone, Default)]
pub struct PathRecords {
    pub(crate) records: Vec<PathRecord>,
    pub(crate) names: NameVec,
    pub(crate) path_count: usize,
}

impl PathRecords {
    /// Create an empty path under `name`. The new id is the record
    /// index; destroyed ids are not reissued.
    pub(crate) fn create(&mut self, name: &[u8]) -> Result<PathId, GraphError> {
        let id = self.records.len() as u64;
        self.names.push(name, id)?;
        self.records.push(PathRecord::default());
        self.path_count += 1;
        Ok(PathId(id))
    }

    pub(crate) fn record(&self, path: PathId) -> Result<&PathRecord, GraphError> {
        self.records
            .get(path.0 as usize)
            .filter(|r| !r.deleted)
            .ok_or(GraphError::NoSuchPath(path))
    }

    pub(crate) fn record_mut(
        &mut self,
        path: PathId,
    ) -> Result<&mut PathRecord, GraphError> {
        self.records
            .get_mut(path.0 as usize)
            .filter(|r| !r.deleted)
            .ok_or(GraphError::NoSuchPath(path))
    }

    pub(crate) fn has_record(&self, path: PathId) -> bool {
        self.record(path).is_ok()
    }

    /// Live path ids, in creation order.
    pub(crate) fn live_ids(&self) -> impl Iterator<Item = PathId> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.deleted)
            .map(|(ix, _)| PathId(ix as u64))
    }

    pub(crate) fn clear(&mut self) {
        *self = Default::default();
    }
}
