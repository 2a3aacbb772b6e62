/*!

The dynamic indexed vectors that back the graph stores.

Four roles, all supporting positional insertion and removal so that
the graph can mutate in place:

* [`vector::PackedIntVec`] — the width-growing packed integer vector
  every other structure is built on
* [`intvec::RankIntVec`] — an integer string over a dynamic alphabet
  with `rank`/`select` by symbol
* [`bitvec::IndexedBitVec`] — a bit vector with `rank`/`select` over
  both bit values
* [`runs::RunLengthVec`] — an integer string stored as runs, for the
  few-distinct-long-runs case
* [`names::NameVec`] — a delimited text of names with a start-marker
  index, for name lookup

*/

pub mod bitvec;
pub mod intvec;
pub mod names;
pub mod runs;
pub mod traits;
pub mod vector;

pub use self::{
    bitvec::IndexedBitVec,
    intvec::RankIntVec,
    names::NameVec,
    runs::RunLengthVec,
    traits::DynCollection,
    vector::PackedIntVec,
};

#[inline]
pub fn width_for(value: u64) -> usize {
    64 - value.leading_zeros() as usize
}
