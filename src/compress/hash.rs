//! Hash functions for the match finder
//!
//! Four hashes of growing context length (3, 5, 9 and 13 bytes) are computed
//! at every scan position. Each one extends the previous value, so the longer
//! contexts cost only two byte folds per step. The hashing can be changed
//! freely without affecting the stream format; only the compression ratio
//! depends on it.

/// Bytes that must be readable from a scan position to compute all four hashes
pub const HASH_CONTEXT: usize = 13;

/// Seed hash over the first three bytes of `q`
#[inline]
pub fn hash3(q: &[u8]) -> u32 {
    ((q[0] as u32) << 14)
        .wrapping_add((q[1] as u32) << 7)
        .wrapping_add(q[2] as u32)
}

/// Fold two more bytes into a running hash
#[inline]
pub fn extend2(h: u32, a: u8, b: u8) -> u32 {
    (h << 14)
        .wrapping_add(h >> 18)
        .wrapping_add((a as u32) << 7)
        .wrapping_add(b as u32)
}

/// Map a hash onto a table slot
#[inline]
pub fn scramble(h: u32, mask: u32) -> usize {
    (h.wrapping_add(h >> 16) & mask) as usize
}

/// Table slots for the 3-, 5-, 9- and 13-byte contexts at the start of `q`
///
/// `q` must hold at least [`HASH_CONTEXT`] bytes.
pub fn context_slots(q: &[u8], mask: u32) -> [usize; 4] {
    let mut h = hash3(q);
    let s1 = scramble(h, mask);
    h = extend2(h, q[3], q[4]);
    let s2 = scramble(h, mask);
    h = extend2(h, q[5], q[6]);
    h = extend2(h, q[7], q[8]);
    let s3 = scramble(h, mask);
    h = extend2(h, q[9], q[10]);
    h = extend2(h, q[11], q[12]);
    let s4 = scramble(h, mask);
    [s1, s2, s3, s4]
}
