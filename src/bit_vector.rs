//! A succinct, immutable bit vector with constant-time `rank`/`select` via a
//! two-level block structure, grounded on `BitVector.{h,cpp}` from the
//! reference implementation this crate's algorithms are derived from.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::util::{read_u32, read_u64, write_u32, write_u64};

/// Bits per machine word used for popcount sweeps.
const WORD_BITS: usize = 64;
/// Bits per superblock; must be a multiple of [`WORD_BITS`].
const SUPERBLOCK_BITS: usize = 512;
const WORDS_PER_SUPERBLOCK: usize = SUPERBLOCK_BITS / WORD_BITS;

/// An immutable bit sequence supporting `O(1)` rank and random-access bit
/// reads.
///
/// Bits are packed MSB-first within each 64-bit word; the final word is
/// zero-padded past the last real bit. Every `SUPERBLOCK_BITS` bits, the
/// running popcount is snapshotted into `superblock_ranks` so that `rank1`
/// only ever has to scan a handful of words plus one masked tail word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVector {
    words: Vec<u64>,
    superblock_ranks: Vec<u32>,
    len: usize,
}

impl BitVector {
    /// Builds a bit vector from `bits`. Fails with [`Error::Length`] if `bits`
    /// is empty, and with [`Error::Overflow`] if any superblock would need to
    /// record more than `u32::MAX` set bits.
    pub fn from_bits(bits: &[bool]) -> Result<Self> {
        if bits.is_empty() {
            return Err(Error::Length);
        }
        let len = bits.len();
        let n_words = len / WORD_BITS + 1;
        let mut words = vec![0u64; n_words];
        let mut superblock_ranks = Vec::with_capacity(len / SUPERBLOCK_BITS);
        let mut running: u64 = 0;

        for (i, &b) in bits.iter().enumerate() {
            if b {
                let word_idx = i / WORD_BITS;
                let bit_in_word = i % WORD_BITS;
                words[word_idx] |= 1u64 << (WORD_BITS - 1 - bit_in_word);
                running += 1;
            }
            if (i + 1) % SUPERBLOCK_BITS == 0 {
                if running > u32::MAX as u64 {
                    return Err(Error::Overflow);
                }
                superblock_ranks.push(running as u32);
            }
        }

        Ok(BitVector {
            words,
            superblock_ranks,
            len,
        })
    }

    /// Number of bits held.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Number of 1-bits in positions `[0, i]`.
    pub fn rank1(&self, i: usize) -> Result<u64> {
        if i >= self.len {
            return Err(Error::OutOfRange);
        }
        let qq = i / SUPERBLOCK_BITS;
        let mut count = if qq > 0 {
            self.superblock_ranks[qq - 1] as u64
        } else {
            0
        };

        let start_word = qq * WORDS_PER_SUPERBLOCK;
        let end_word = i / WORD_BITS;
        for w in &self.words[start_word..end_word] {
            count += w.count_ones() as u64;
        }

        let r = i % WORD_BITS;
        let tail = self.words[end_word] >> (WORD_BITS - r - 1);
        count += tail.count_ones() as u64;

        Ok(count)
    }

    /// Number of 0-bits in positions `[0, i]`.
    pub fn rank0(&self, i: usize) -> Result<u64> {
        Ok((i as u64 + 1) - self.rank1(i)?)
    }

    /// The bit value at position `i`. Named `select` for historical reasons —
    /// this is a random-access read, not select-by-rank.
    pub fn select(&self, i: usize) -> Result<bool> {
        if i >= self.len {
            return Err(Error::OutOfRange);
        }
        let word_idx = i / WORD_BITS;
        let bit_in_word = i % WORD_BITS;
        Ok((self.words[word_idx] >> (WORD_BITS - 1 - bit_in_word)) & 1 == 1)
    }

    pub fn serialize_to<W: Write>(&self, w: &mut W) -> Result<()> {
        write_u64(w, SUPERBLOCK_BITS as u64)?;
        write_u64(w, WORD_BITS as u64)?;
        let q = self.superblock_ranks.len() as u64;
        let r = (self.len - q as usize * SUPERBLOCK_BITS) as u64;
        write_u64(w, q)?;
        write_u64(w, r)?;
        for word in &self.words {
            write_u64(w, *word)?;
        }
        for &sr in &self.superblock_ranks {
            write_u32(w, sr)?;
        }
        Ok(())
    }

    pub fn deserialize_from<R: Read>(r: &mut R) -> Result<Self> {
        let check_superblock = read_u64(r)?;
        if check_superblock != SUPERBLOCK_BITS as u64 {
            return Err(Error::Format);
        }
        let check_word = read_u64(r)?;
        if check_word != WORD_BITS as u64 {
            return Err(Error::Format);
        }
        let q = read_u64(r)? as usize;
        let rem = read_u64(r)? as usize;
        let len = q * SUPERBLOCK_BITS + rem;
        if len == 0 {
            return Err(Error::Format);
        }
        let n_words = len / WORD_BITS + 1;
        let mut words = Vec::with_capacity(n_words);
        for _ in 0..n_words {
            words.push(read_u64(r)?);
        }
        let mut superblock_ranks = Vec::with_capacity(q);
        for _ in 0..q {
            superblock_ranks.push(read_u32(r)?);
        }
        Ok(BitVector {
            words,
            superblock_ranks,
            len,
        })
    }
}
