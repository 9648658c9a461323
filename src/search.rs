//! Backward search and the forward-context sort used to pair up `find`'s two
//! row intervals, grounded on `examples/original_source/FM-Index/FMIndex.cpp`'s
//! `backward_search` and `msd_sort`.

use std::collections::BTreeMap;

use crate::iter::{rank_through_row, Iter};
use crate::wavelet_tree::WaveletTree;

/// `[C[c], next key's C value)`, or `n` in place of a missing successor key.
/// `None` if `c` itself is not a key of `c_table` (pattern byte absent from T).
fn interval_bounds(c_table: &BTreeMap<u8, u64>, n: usize, c: u8) -> Option<(usize, usize)> {
    let lb = *c_table.get(&c)?;
    let ub = c_table
        .range((std::ops::Bound::Excluded(c), std::ops::Bound::Unbounded))
        .next()
        .map(|(_, &v)| v)
        .unwrap_or(n as u64);
    Some((lb as usize, ub as usize))
}

/// Backward search over `wt` (either `WT_fwd` or `WT_rev`), consuming
/// `chars` in the order the caller wants matched against that tree's row
/// ordering (i.e. already reversed by the caller where the contract calls
/// for it). Returns the half-open row interval `[lb, ub)`, or `(1, 0)` — an
/// interval with `ub <= lb`, the empty-match sentinel — if no rotation
/// matches.
pub(crate) fn backward_search(
    mut chars: impl Iterator<Item = u8>,
    wt: &WaveletTree,
    end_idx: usize,
    c_table: &BTreeMap<u8, u64>,
    n: usize,
) -> (usize, usize) {
    const EMPTY: (usize, usize) = (1, 0);

    let first = match chars.next() {
        Some(c) => c,
        None => return EMPTY,
    };
    let (mut lb, mut ub) = match interval_bounds(c_table, n, first) {
        Some(b) => b,
        None => return EMPTY,
    };

    for c in chars {
        if ub <= lb {
            return EMPTY;
        }
        let base = match c_table.get(&c) {
            Some(&v) => v,
            None => return EMPTY,
        };
        let lb_rank = rank_through_row(wt, end_idx, lb, c).unwrap_or(0);
        let ub_rank = rank_through_row(wt, end_idx, ub, c).unwrap_or(0);
        lb = base as usize + lb_rank as usize;
        ub = base as usize + ub_rank as usize;
    }

    if ub <= lb {
        EMPTY
    } else {
        (lb, ub)
    }
}

/// Returns a permutation `pi` of `0..iters.len()` ordering the iterators by
/// the lexicographic order of the forward text each scans, up to
/// `max_context` bytes of look-ahead. Ended iterators compare greater than
/// any live byte (256 stands in for "no more text" since it exceeds every
/// `u8`). Each iterator passed in is consumed — callers that need the
/// original unconsumed iterators should seed fresh ones separately.
pub(crate) fn sort_by_forward_context(mut iters: Vec<Iter>, max_context: usize) -> Vec<usize> {
    let keys: Vec<Vec<u16>> = iters
        .iter_mut()
        .map(|it| {
            let mut key = Vec::with_capacity(max_context);
            for _ in 0..max_context {
                if it.at_end() {
                    key.push(256);
                    break;
                }
                key.push(it.current().expect("checked not at_end") as u16);
                let _ = it.advance();
            }
            key
        })
        .collect();

    let mut perm: Vec<usize> = (0..iters.len()).collect();
    perm.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
    perm
}
