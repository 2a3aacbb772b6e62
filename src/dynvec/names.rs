use bstr::ByteSlice;

use super::bitvec::IndexedBitVec;
use super::traits::*;
use super::vector::PackedIntVec;

use crate::error::GraphError;

/// The delimiter byte between stored names. Excluded from legal
/// names, which keeps the text self-delimiting.
pub const DELIMITER: u8 = b'$';

/// A concatenated text of names, each terminated by [`DELIMITER`],
/// with a parallel bit vector marking name starts and a packed vector
/// carrying the owner id of each entry. Fills the self-indexed-text
/// role for path-name lookup: exact match, prefix search, and
/// name-by-entry via `select` on the start markers.
#[derive(Debug, Clone, Default)]
pub struct NameVec {
    text: PackedIntVec,
    starts: IndexedBitVec,
    ids: PackedIntVec,
}

/// A name is legal if it is nonempty, printable ASCII, and free of
/// the delimiter byte.
pub fn valid_name(name: &[u8]) -> bool {
    !name.is_empty()
        && name
            .iter()
            .all(|&b| (0x20..=0x7E).contains(&b) && b != DELIMITER)
}

impl NameVec {
    pub fn new() -> Self {
        Default::default()
    }

    /// The number of stored names.
    #[inline]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    fn entry_bounds(&self, entry: usize) -> Option<(usize, usize)> {
        let start = self.starts.select1(entry)?;
        let mut end = start;
        while self.text.get(end) != DELIMITER as u64 {
            end += 1;
        }
        Some((start, end))
    }

    fn entry_name(&self, entry: usize) -> Option<Vec<u8>> {
        let (start, end) = self.entry_bounds(entry)?;
        Some(
            self.text
                .iter_slice(start, end - start)
                .map(|b| b as u8)
                .collect(),
        )
    }

    /// Store `name` for owner `id`. Fails if the name is illegal or
    /// already present.
    pub fn push(&mut self, name: &[u8], id: u64) -> Result<(), GraphError> {
        if !valid_name(name) {
            return Err(GraphError::InvalidName(
                name.as_bstr().to_string(),
            ));
        }
        if self.find(name).is_some() {
            return Err(GraphError::DuplicatePath(
                name.as_bstr().to_string(),
            ));
        }

        for (ix, &b) in name.iter().enumerate() {
            self.text.append(b as u64);
            self.starts.append(ix == 0);
        }
        self.text.append(DELIMITER as u64);
        self.starts.append(false);
        self.ids.append(id);
        Ok(())
    }

    /// The owner id stored for `name`, if present.
    pub fn find(&self, name: &[u8]) -> Option<u64> {
        for entry in 0..self.count() {
            if self.entry_name(entry).as_deref() == Some(name) {
                return Some(self.ids.get(entry));
            }
        }
        None
    }

    /// The owner ids of every name beginning with `prefix`, in
    /// storage order.
    pub fn find_prefix(&self, prefix: &[u8]) -> Vec<u64> {
        (0..self.count())
            .filter_map(|entry| {
                let name = self.entry_name(entry)?;
                if name.starts_with(prefix) {
                    Some(self.ids.get(entry))
                } else {
                    None
                }
            })
            .collect()
    }

    /// The name stored for owner `id`, if present.
    pub fn name_of(&self, id: u64) -> Option<Vec<u8>> {
        let entry = (0..self.count()).find(|&e| self.ids.get(e) == id)?;
        self.entry_name(entry)
    }

    /// Remove the name stored for owner `id`, returning `true` if one
    /// was removed.
    pub fn remove_by_id(&mut self, id: u64) -> bool {
        let entry = match (0..self.count()).find(|&e| self.ids.get(e) == id) {
            Some(e) => e,
            None => return false,
        };
        let (start, end) = self.entry_bounds(entry).unwrap();
        // remove the name bytes and the trailing delimiter
        for _ in start..=end {
            self.text.remove(start);
            self.starts.remove(start);
        }
        self.ids.remove(entry);
        true
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.starts.clear();
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_find_remove() {
        let mut names = NameVec::new();
        names.push(b"ref", 0).unwrap();
        names.push(b"alt-1", 1).unwrap();
        names.push(b"alt-2", 2).unwrap();

        assert_eq!(names.count(), 3);
        assert_eq!(names.find(b"ref"), Some(0));
        assert_eq!(names.find(b"alt-2"), Some(2));
        assert_eq!(names.find(b"alt"), None);
        assert_eq!(names.name_of(1), Some(b"alt-1".to_vec()));

        assert!(names.remove_by_id(1));
        assert_eq!(names.count(), 2);
        assert_eq!(names.find(b"alt-1"), None);
        assert_eq!(names.find(b"alt-2"), Some(2));
        assert!(!names.remove_by_id(1));

        // the freed name can be stored again, for a new owner
        names.push(b"alt-1", 7).unwrap();
        assert_eq!(names.find(b"alt-1"), Some(7));
    }

    #[test]
    fn prefix_search() {
        let mut names = NameVec::new();
        names.push(b"chr1", 10).unwrap();
        names.push(b"chr10", 11).unwrap();
        names.push(b"chr2", 12).unwrap();

        assert_eq!(names.find_prefix(b"chr1"), vec![10, 11]);
        assert_eq!(names.find_prefix(b"chr"), vec![10, 11, 12]);
        assert_eq!(names.find_prefix(b"x"), Vec::<u64>::new());
    }

    #[test]
    fn rejects_bad_names() {
        let mut names = NameVec::new();
        assert!(matches!(
            names.push(b"", 0),
            Err(GraphError::InvalidName(_))
        ));
        assert!(matches!(
            names.push(b"a$b", 0),
            Err(GraphError::InvalidName(_))
        ));
        assert!(matches!(
            names.push(b"a\nb", 0),
            Err(GraphError::InvalidName(_))
        ));

        names.push(b"dup", 0).unwrap();
        assert!(matches!(
            names.push(b"dup", 1),
            Err(GraphError::DuplicatePath(_))
        ));
    }
}
