//! The bidirectional text iterator, grounded on
//! `examples/original_source/FM-Index/FMIndex.{h,cpp}`'s `const_iterator`.
//!
//! A single iterator type serves both directions: one built over the index's
//! forward wavelet tree (`WT_fwd`, the wavelet tree over `BWT(T)`) scans `T`
//! backward, and one built over the reverse wavelet tree (`WT_rev`, over
//! `BWT(reverse(T))`) scans `T` forward. Which direction a given iterator
//! walks is entirely a function of which tree and `end_idx` it was built
//! with — the stepping logic itself (`advance`) is identical either way.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::wavelet_tree::WaveletTree;

/// Maps a conceptual row index (spanning the `n + 1` rows of the hypothetical
/// sorted-rotation matrix, one of which — `end_idx` — has no corresponding
/// wavelet-tree position) onto an actual position in the `n`-byte BWT string.
/// Fails when `i == end_idx`, the one row with no such position.
pub(crate) fn bwt_pos(i: usize, end_idx: usize) -> Result<usize> {
    if i == end_idx {
        return Err(Error::OutOfRange);
    }
    Ok(if i > end_idx { i - 1 } else { i })
}

/// The number of occurrences of `c` in conceptual rows `[0, i]` (inclusive),
/// used by backward search's interval narrowing. Row `end_idx` carries no
/// byte (it is the phantom row `bwt_pos` skips), so it never contributes an
/// occurrence; querying exactly at it falls back to the row before.
pub(crate) fn rank_through_row(
    wt: &WaveletTree,
    end_idx: usize,
    i: usize,
    c: u8,
) -> Result<u64> {
    if i == end_idx {
        if i == 0 {
            return Ok(0);
        }
        return wt.rank(bwt_pos(i - 1, end_idx)?, c);
    }
    wt.rank(bwt_pos(i, end_idx)?, c)
}

/// A cursor into the text, walking forward or backward one byte at a time
/// through the LF-mapping of one of [`crate::fm_index::FMIndex`]'s two
/// wavelet trees.
///
/// Cheap to copy: it carries only a row index, a cached current byte, and
/// borrows of the tree/table it walks. `i == end_idx` is the end position —
/// there is no current byte there, matching end-of-text in the scan
/// direction this iterator implements.
#[derive(Debug, Clone, Copy)]
pub struct Iter<'a> {
    wt: &'a WaveletTree,
    end_idx: usize,
    c_table: &'a BTreeMap<u8, u64>,
    row: usize,
    current: Option<u8>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(
        wt: &'a WaveletTree,
        end_idx: usize,
        c_table: &'a BTreeMap<u8, u64>,
        row: usize,
    ) -> Result<Self> {
        if row > wt.size() {
            return Err(Error::OutOfRange);
        }
        let current = if row == end_idx {
            None
        } else {
            Some(wt.select(bwt_pos(row, end_idx)?)?)
        };
        Ok(Iter {
            wt,
            end_idx,
            c_table,
            row,
            current,
        })
    }

    /// The byte at the iterator's current position. Fails with
    /// [`Error::Overflow`] if the iterator is at the end, the same error
    /// `advance` raises for the same reason.
    pub fn current(&self) -> Result<u8> {
        self.current.ok_or(Error::Overflow)
    }

    /// True once the iterator has scanned past the last character in its
    /// direction of travel.
    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Advances one byte in this iterator's direction of travel. Fails with
    /// [`Error::Overflow`] if the iterator is already at the end.
    pub fn advance(&mut self) -> Result<()> {
        let c = self.current.ok_or(Error::Overflow)?;
        let base = *self
            .c_table
            .get(&c)
            .expect("byte read from the wavelet tree must be in its own alphabet");
        let rank = self.wt.rank(bwt_pos(self.row, self.end_idx)?, c)?;
        self.row = base as usize + rank as usize;
        self.current = if self.row == self.end_idx {
            None
        } else {
            Some(self.wt.select(bwt_pos(self.row, self.end_idx)?)?)
        };
        Ok(())
    }
}

impl PartialEq for Iter<'_> {
    /// Structural equality: same underlying tree and table (by identity,
    /// since two indices never share one), same `end_idx`, same row.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.wt, other.wt)
            && self.end_idx == other.end_idx
            && std::ptr::eq(self.c_table, other.c_table)
            && self.row == other.row
    }
}

impl Eq for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_and_tree(s: &[u8]) -> (WaveletTree, BTreeMap<u8, u64>) {
        let wt = WaveletTree::new(s).unwrap();
        let mut c = BTreeMap::new();
        for &byte in wt.alphabet() {
            c.insert(byte, wt.cum_freq(byte));
        }
        (wt, c)
    }

    #[test]
    fn test_bwt_pos() {
        assert_eq!(bwt_pos(0, 3).unwrap(), 0);
        assert_eq!(bwt_pos(2, 3).unwrap(), 2);
        assert_eq!(bwt_pos(4, 3).unwrap(), 3);
        assert!(matches!(bwt_pos(3, 3), Err(Error::OutOfRange)));
    }

    #[test]
    fn test_single_char_iterator_at_end_after_one_step() {
        // BWT of "\0" is "\0" with end_idx = 0.
        let (wt, c) = table_and_tree(b"\0");
        let it = Iter::new(&wt, 0, &c, 0).unwrap();
        assert!(it.at_end());
        assert!(matches!(it.current(), Err(Error::Overflow)));
    }

    #[test]
    fn test_advance_past_end_overflows() {
        let (wt, c) = table_and_tree(b"\0");
        let mut it = Iter::new(&wt, 0, &c, 0).unwrap();
        assert!(matches!(it.advance(), Err(Error::Overflow)));
    }
}
