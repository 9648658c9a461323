//! The Burrows-Wheeler transform primitive, grounded on the suffix-array
//! induction approach used by `openbwt-v1.5/BWT.c` (the original construction
//! this spec is distilled from) and on `examples/ajalab-fm-index`'s own
//! `suffix_array/sais.rs`, which builds an explicit suffix array rather than
//! emitting the BWT directly from an unsorted induction sweep.
//!
//! Unlike both of those, the suffix array here is built with a plain
//! prefix-doubling rank sort rather than a linear-time SA-IS induction: the
//! BWT contract (spec §4.3) is explicit that any construction algorithm
//! producing the same `(L, p)` pair is conformant, and prefix-doubling is far
//! easier to get right than a from-scratch port of the LMS-substring
//! induction sweep (see `DESIGN.md`).

/// Builds the suffix array of a sequence over an arbitrary totally-ordered
/// alphabet via prefix doubling. `O(n log^2 n))`.
fn suffix_array(s: &[u32]) -> Vec<usize> {
    let n = s.len();
    let mut sa: Vec<usize> = (0..n).collect();
    if n <= 1 {
        return sa;
    }
    let mut rank: Vec<i64> = s.iter().map(|&c| c as i64).collect();
    let mut tmp = vec![0i64; n];
    let mut k = 1usize;
    loop {
        let key = |i: usize| -> (i64, i64) {
            let snd = if i + k < n { rank[i + k] } else { -1 };
            (rank[i], snd)
        };
        sa.sort_by_key(|&i| key(i));
        tmp[sa[0]] = 0;
        for idx in 1..n {
            let bump = if key(sa[idx - 1]) < key(sa[idx]) { 1 } else { 0 };
            tmp[sa[idx]] = tmp[sa[idx - 1]] + bump;
        }
        rank.copy_from_slice(&tmp);
        if rank[sa[n - 1]] as usize == n - 1 {
            break;
        }
        k *= 2;
    }
    sa
}

/// Computes `(L, row)` for `text`: `L` is the Burrows-Wheeler transform (the
/// last byte of every cyclic rotation of `text`, in sorted-rotation order)
/// and `row` is the 0-based row of the rotation that begins at `text[0]` —
/// the same quantity the reference implementation's raw `BWT()` function
/// returns directly, before the `+1` shift into the 1-based `p` the public
/// [`bwt`] wrapper below applies.
///
/// Ties between rotations that are equal as finite strings (runs of a
/// repeated byte, entire-text repetition, etc.) are broken the same way a
/// real implementation breaks them: by appending a byte strictly smaller
/// than any real byte (`0`, with every real byte remapped to `1..=256`) and
/// sorting suffixes of that augmented sequence instead of sorting the bare
/// rotations. Discarding the suffix that starts at the appended sentinel
/// itself, and reading each remaining row's predecessor character with a
/// wraparound modulo `text.len()` rather than via the sentinel, reproduces
/// exactly the order a sentinel-free cyclic-rotation sort would produce.
fn bwt_0based(text: &[u8]) -> (Vec<u8>, usize) {
    let n = text.len();
    if n == 0 {
        return (Vec::new(), 0);
    }

    let augmented: Vec<u32> = text
        .iter()
        .map(|&b| b as u32 + 1)
        .chain(std::iter::once(0u32))
        .collect();
    let sa = suffix_array(&augmented);

    let mut l = Vec::with_capacity(n);
    let mut row0 = 0usize;
    let mut row = 0usize;
    for &pos in &sa {
        if pos == n {
            // The sentinel's own suffix; it does not correspond to a real rotation.
            continue;
        }
        let prev = if pos == 0 { n - 1 } else { pos - 1 };
        l.push(text[prev]);
        if pos == 0 {
            row0 = row;
        }
        row += 1;
    }
    (l, row0)
}

/// Computes `(L, p)` for `text`: `L` is as in [`bwt_0based`] and `p` is the
/// 1-based row of the rotation that begins at `text[0]` (`p = row + 1`),
/// matching spec §3's convention.
pub(crate) fn bwt(text: &[u8]) -> (Vec<u8>, usize) {
    if text.is_empty() {
        return (Vec::new(), 0);
    }
    let (l, row0) = bwt_0based(text);
    (l, row0 + 1)
}

/// Reconstructs `T` from its Burrows-Wheeler transform `L` and primary index
/// `p`, by following the LF-mapping backward from row `p - 1`. Not used by
/// [`crate::fm_index::FMIndex`] queries; kept for round-trip testing (spec §8
/// invariant 14).
pub(crate) fn unbwt(l: &[u8], p: usize) -> Vec<u8> {
    let n = l.len();
    if n == 0 {
        return Vec::new();
    }

    let mut count = [0u64; 256];
    for &b in l {
        count[b as usize] += 1;
    }
    let mut cum = [0u64; 256];
    let mut sum = 0u64;
    for (i, &c) in count.iter().enumerate() {
        cum[i] = sum;
        sum += c;
    }

    let mut occ = [0u64; 256];
    let mut lf = vec![0usize; n];
    for (i, &b) in l.iter().enumerate() {
        let b = b as usize;
        lf[i] = (cum[b] + occ[b]) as usize;
        occ[b] += 1;
    }

    let mut result = vec![0u8; n];
    let mut row = p - 1;
    for slot in result.iter_mut().rev() {
        *slot = l[row];
        row = lf[row];
    }
    result
}
