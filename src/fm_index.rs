//! The FM-index proper: two wavelet trees, the cumulative-frequency table,
//! and the `count`/`find`/`find_lines` queries built on top of them.
//! Grounded on `examples/original_source/FM-Index/FMIndex.{h,cpp}`.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use crate::bwt::bwt;
use crate::error::{Error, Result};
use crate::iter::Iter;
use crate::search::{backward_search, sort_by_forward_context};
use crate::util::{read_u64, write_u64};
use crate::wavelet_tree::WaveletTree;

const DEFAULT_MAX_CONTEXT: usize = 100;
const DEFAULT_SEPARATOR: u8 = b'\n';

/// A self-indexing full-text search structure over a fixed byte string.
/// Construction consumes the text; nothing below this point stores it
/// directly, only its two Burrows-Wheeler transforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FMIndex {
    wt_fwd: WaveletTree,
    end_idx_fwd: usize,
    wt_rev: WaveletTree,
    end_idx_rev: usize,
    c_table: BTreeMap<u8, u64>,
}

fn cum_freq_table(wt: &WaveletTree) -> BTreeMap<u8, u64> {
    wt.alphabet().iter().map(|&c| (c, wt.cum_freq(c))).collect()
}

impl FMIndex {
    /// Builds an index over `text`. Fails with [`Error::Length`] on empty
    /// input.
    pub fn new(text: &[u8]) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::Length);
        }
        let (l_fwd, p_fwd) = bwt(text);
        let wt_fwd = WaveletTree::new(&l_fwd)?;
        let end_idx_fwd = p_fwd - 1;

        let reversed: Vec<u8> = text.iter().rev().copied().collect();
        let (l_rev, p_rev) = bwt(&reversed);
        let wt_rev = WaveletTree::new(&l_rev)?;
        let end_idx_rev = p_rev - 1;

        let c_table = cum_freq_table(&wt_fwd);

        Ok(FMIndex {
            wt_fwd,
            end_idx_fwd,
            wt_rev,
            end_idx_rev,
            c_table,
        })
    }

    /// Length of the indexed text.
    pub fn size(&self) -> usize {
        self.wt_fwd.size()
    }

    /// A forward iterator anchored at the very first character of the text.
    pub fn begin(&self) -> Result<Iter<'_>> {
        Iter::new(&self.wt_rev, self.end_idx_rev, &self.c_table, 0)
    }

    /// Number of (possibly overlapping) occurrences of `pattern` in the
    /// indexed text. Fails with [`Error::Length`] on an empty pattern.
    pub fn count(&self, pattern: &[u8]) -> Result<usize> {
        if pattern.is_empty() {
            return Err(Error::Length);
        }
        let n = self.size();
        let (lb, ub) = backward_search(
            pattern.iter().rev().copied(),
            &self.wt_fwd,
            self.end_idx_fwd,
            &self.c_table,
            n,
        );
        Ok(ub.saturating_sub(lb))
    }

    /// Every occurrence of `pattern`, as paired forward/backward iterators
    /// anchored immediately after/before the match, with a default
    /// look-ahead depth of 100 bytes for pairing the two search directions.
    pub fn find(&self, pattern: &[u8]) -> Result<Vec<(Iter<'_>, Iter<'_>)>> {
        self.find_with_context(pattern, DEFAULT_MAX_CONTEXT)
    }

    /// As [`FMIndex::find`], with an explicit look-ahead depth.
    pub fn find_with_context(
        &self,
        pattern: &[u8],
        max_context: usize,
    ) -> Result<Vec<(Iter<'_>, Iter<'_>)>> {
        if pattern.is_empty() {
            return Err(Error::Length);
        }
        let n = self.size();
        let (lb, ub) = backward_search(
            pattern.iter().rev().copied(),
            &self.wt_fwd,
            self.end_idx_fwd,
            &self.c_table,
            n,
        );
        if ub <= lb {
            return Ok(Vec::new());
        }
        let (lbr, ubr) = backward_search(
            pattern.iter().copied(),
            &self.wt_rev,
            self.end_idx_rev,
            &self.c_table,
            n,
        );
        debug_assert_eq!(ub - lb, ubr - lbr);

        let mut sort_iters = Vec::with_capacity(ubr - lbr);
        for row in lbr..ubr {
            sort_iters.push(Iter::new(&self.wt_rev, self.end_idx_rev, &self.c_table, row)?);
        }
        let pi = sort_by_forward_context(sort_iters, max_context);

        let mut pairs = Vec::with_capacity(ub - lb);
        for (k, &p) in pi.iter().enumerate() {
            let fwd = Iter::new(&self.wt_rev, self.end_idx_rev, &self.c_table, lbr + p)?;
            let bwd = Iter::new(&self.wt_fwd, self.end_idx_fwd, &self.c_table, lb + k)?;
            pairs.push((fwd, bwd));
        }
        Ok(pairs)
    }

    /// The line (bounded by `sep`) containing each occurrence of `pattern`,
    /// using the default separator `'\n'` and 100-byte look-ahead depth.
    pub fn find_lines(&self, pattern: &[u8]) -> Result<Vec<Vec<u8>>> {
        self.find_lines_with(pattern, DEFAULT_SEPARATOR, DEFAULT_MAX_CONTEXT)
    }

    /// As [`FMIndex::find_lines`], with an explicit separator byte and
    /// look-ahead depth.
    pub fn find_lines_with(
        &self,
        pattern: &[u8],
        sep: u8,
        max_context: usize,
    ) -> Result<Vec<Vec<u8>>> {
        let pairs = self.find_with_context(pattern, max_context)?;
        let mut lines = Vec::with_capacity(pairs.len());
        for (mut fwd, mut bwd) in pairs {
            let mut forward = Vec::new();
            for _ in 0..max_context {
                match fwd.current() {
                    Ok(c) if c != sep => forward.push(c),
                    _ => break,
                }
                if fwd.advance().is_err() {
                    break;
                }
            }

            let mut backward = Vec::new();
            for _ in 0..max_context {
                match bwd.current() {
                    Ok(c) if c != sep => backward.push(c),
                    _ => break,
                }
                if bwd.advance().is_err() {
                    break;
                }
            }
            backward.reverse();

            let mut line = backward;
            line.extend_from_slice(pattern);
            line.extend_from_slice(&forward);
            lines.push(line);
        }
        Ok(lines)
    }

    pub fn serialize_to<W: Write>(&self, w: &mut W) -> Result<()> {
        self.wt_fwd.serialize_to(w)?;
        write_u64(w, self.end_idx_fwd as u64)?;
        self.wt_rev.serialize_to(w)?;
        write_u64(w, self.end_idx_rev as u64)?;
        Ok(())
    }

    pub fn deserialize_from<R: Read>(r: &mut R) -> Result<Self> {
        let wt_fwd = WaveletTree::deserialize_from(r)?;
        let end_idx_fwd = read_u64(r)? as usize;
        let wt_rev = WaveletTree::deserialize_from(r)?;
        let end_idx_rev = read_u64(r)? as usize;
        let c_table = cum_freq_table(&wt_fwd);
        Ok(FMIndex {
            wt_fwd,
            end_idx_fwd,
            wt_rev,
            end_idx_rev,
            c_table,
        })
    }
}
