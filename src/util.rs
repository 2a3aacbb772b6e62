pub mod dna {

    include!(concat!(env!("OUT_DIR"), "/comp_table.rs"));

    /// A lookup-table for the DNA complements is generated at compile
    /// time by the build.rs script in the project root, and placed in
    /// the compilation out-dir under the name "comp_table.rs". The
    /// table preserves case, and `N`/`n` are their own complements.
    #[inline]
    pub const fn comp_base(base: u8) -> u8 {
        DNA_COMP_TABLE[base as usize]
    }

    #[inline]
    pub fn rev_comp<I, B>(seq: I) -> Vec<u8>
    where
        B: std::borrow::Borrow<u8>,
        I: IntoIterator<Item = B>,
        I::IntoIter: DoubleEndedIterator,
    {
        seq.into_iter()
            .rev()
            .map(|b| comp_base(*b.borrow()))
            .collect()
    }

    #[inline]
    pub fn rev_comp_iter<I, B>(seq: I) -> impl Iterator<Item = u8>
    where
        B: std::borrow::Borrow<u8>,
        I: IntoIterator<Item = B>,
        I::IntoIter: DoubleEndedIterator,
    {
        seq.into_iter().rev().map(|b| comp_base(*b.borrow()))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        use quickcheck::{Arbitrary, Gen, QuickCheck};

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Base(u8);

        impl Arbitrary for Base {
            fn arbitrary(g: &mut Gen) -> Base {
                let base = g
                    .choose(&[
                        b'A', b'C', b'G', b'T', b'N', b'a', b'c', b'g', b't',
                        b'n',
                    ])
                    .unwrap();
                Base(*base)
            }
        }

        fn is_comp_involutive(b: Base) -> bool {
            comp_base(comp_base(b.0)) == b.0
        }

        fn is_rev_comp_involutive(seq: Vec<Base>) -> bool {
            let bytes: Vec<u8> = seq.iter().map(|b| b.0).collect();
            rev_comp(rev_comp(&bytes)) == bytes
        }

        // rust-bio's revcomp as the independent oracle; restricted to
        // ACGT in either case, where the two tables agree.
        fn matches_bio_revcomp(seq: Vec<Base>) -> bool {
            let bytes: Vec<u8> = seq
                .iter()
                .map(|b| b.0)
                .filter(|&b| b != b'N' && b != b'n')
                .collect();
            rev_comp(&bytes) == bio::alphabets::dna::revcomp(&bytes)
        }

        #[test]
        fn comp_involutive() {
            QuickCheck::new()
                .tests(1000)
                .quickcheck(is_comp_involutive as fn(Base) -> bool);
        }

        #[test]
        fn rev_comp_involutive() {
            QuickCheck::new()
                .tests(1000)
                .quickcheck(is_rev_comp_involutive as fn(Vec<Base>) -> bool);
        }

        #[test]
        fn rev_comp_against_bio() {
            QuickCheck::new()
                .tests(1000)
                .quickcheck(matches_bio_revcomp as fn(Vec<Base>) -> bool);
        }

        #[test]
        fn rev_comp_known() {
            assert_eq!(rev_comp(b"GATTACA"), b"TGTAATC".to_vec());
            assert_eq!(rev_comp(b"acgtN"), b"Nacgt".to_vec());
        }
    }
}
