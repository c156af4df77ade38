//! Match finding
//!
//! Rather than walking full hash chains, the compressor probes only four
//! candidate positions per scan step, one per hash context length. This
//! keeps the search cheap while still catching long repeats through the
//! 9- and 13-byte contexts.

use super::hash::{context_slots, HASH_CONTEXT};
use super::state::CompressState;
use crate::MAX_MATCH_LENGTH;

/// Result of pattern matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Length of the found match (0 if no match)
    pub length: usize,
    /// Backward distance to the match (0 if no match)
    pub distance: usize,
}

impl MatchResult {
    /// Create a new match result
    pub fn new(length: usize, distance: usize) -> Self {
        Self { length, distance }
    }

    /// Create a "no match" result
    pub fn no_match() -> Self {
        Self {
            length: 0,
            distance: 0,
        }
    }

    /// Check if this represents a usable match
    pub fn is_match(&self) -> bool {
        self.length > 2
    }
}

/// Whether a match of `length` at `distance` is worth more than its literals
///
/// Matches longer than 9 bytes are always worth it; shorter ones only when
/// the distance fits one of the compact opcode forms.
pub fn worth_encoding(length: usize, distance: usize) -> bool {
    length > 9
        || (length > 2 && distance <= 0x100)
        || (length > 5 && distance <= 0x4000)
        || (length > 7 && distance <= 0x80000)
}

/// Count equal leading bytes of `data[a..]` and `data[b..]`, up to `max_len`
///
/// Both `a + max_len` and `b + max_len` must lie within `data`.
pub fn match_length(data: &[u8], a: usize, b: usize, max_len: usize) -> usize {
    data[a..a + max_len]
        .iter()
        .zip(&data[b..b + max_len])
        .take_while(|(x, y)| x == y)
        .count()
}

impl CompressState {
    /// Find the best match for `data[pos..]` and record `pos` in the hash table
    ///
    /// Requires `pos + HASH_CONTEXT <= data.len()`. The four hash slots are
    /// only overwritten after all of them have been probed, so a position
    /// never matches against itself. Slots holding offsets at or after `pos`
    /// (left by an earlier call on other data or a later position) are
    /// ignored.
    pub fn find_match(&mut self, data: &[u8], pos: usize) -> MatchResult {
        debug_assert!(pos + HASH_CONTEXT <= data.len());

        let slots = context_slots(&data[pos..], self.mask);
        let max_len = (data.len() - pos).min(MAX_MATCH_LENGTH);
        let window = self.options.window as usize;

        // Anything not longer than 2 bytes is cheaper as literals
        let mut best = MatchResult::new(2, 0);

        for (probe, &slot) in slots.iter().enumerate() {
            let Some(candidate) = self.table[slot] else {
                continue;
            };
            let Some(distance) = pos.checked_sub(candidate as usize).filter(|&d| d > 0) else {
                continue;
            };

            // Later contexts often land on the candidate an earlier one already tried
            if probe > 0 && distance == best.distance {
                continue;
            }

            let length = match_length(data, candidate as usize, pos, max_len);
            if length > best.length && distance <= window && worth_encoding(length, distance) {
                best = MatchResult::new(length, distance);
            }
        }

        for slot in slots {
            self.table[slot] = Some(pos as u32);
        }

        if best.is_match() {
            assert!(best.distance > 0, "accepted match with zero distance");
            best
        } else {
            MatchResult::no_match()
        }
    }
}
