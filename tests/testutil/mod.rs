//! Naive-oracle helpers shared by the integration tests, in the style of the
//! randomised property tests colocated with each module under `src/`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_text(rng: &mut StdRng, len: usize, alphabet: &[u8]) -> Vec<u8> {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0, alphabet.len())])
        .collect()
}

/// Every starting offset at which `pattern` occurs in `text`, overlaps
/// included.
pub fn naive_occurrences(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    text.windows(pattern.len())
        .enumerate()
        .filter(|(_, w)| *w == pattern)
        .map(|(i, _)| i)
        .collect()
}

pub fn naive_count(text: &[u8], pattern: &[u8]) -> usize {
    naive_occurrences(text, pattern).len()
}

/// The reconstructed "line" the spec's `find_lines` would produce for an
/// occurrence starting at `offset`: up to `max_context` bytes on either
/// side, stopping early at `sep`, with `pattern` itself always included.
pub fn naive_line(text: &[u8], pattern: &[u8], offset: usize, sep: u8, max_context: usize) -> Vec<u8> {
    let mut start = offset;
    let mut taken_back = 0;
    while start > 0 && taken_back < max_context && text[start - 1] != sep {
        start -= 1;
        taken_back += 1;
    }
    let mut end = offset + pattern.len();
    let mut taken_fwd = 0;
    while end < text.len() && taken_fwd < max_context && text[end] != sep {
        end += 1;
        taken_fwd += 1;
    }
    text[start..end].to_vec()
}
