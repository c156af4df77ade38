//! Adler-32 checksum
//!
//! The compressed stream ends with the Adler-32 of the original input. The
//! accumulator is fed incrementally while the compressor walks the input, so
//! it always sees the bytes in their original order no matter whether they
//! were emitted as literals or covered by a match.

/// Largest prime below 2^16
const ADLER_MOD: u32 = 65521;

/// Largest block that can be summed before `s2` may overflow 32 bits
const ADLER_BLOCK: usize = 5552;

/// Running Adler-32 state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adler32 {
    s1: u32,
    s2: u32,
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Adler32 {
    /// Create a fresh accumulator (checksum of zero bytes is 1)
    pub fn new() -> Self {
        Self { s1: 1, s2: 0 }
    }

    /// Resume from a previously finished checksum value
    pub fn from_checksum(checksum: u32) -> Self {
        Self {
            s1: checksum & 0xFFFF,
            s2: checksum >> 16,
        }
    }

    /// Fold `data` into the running sums
    pub fn update(&mut self, data: &[u8]) {
        for block in data.chunks(ADLER_BLOCK) {
            for &byte in block {
                self.s1 += byte as u32;
                self.s2 += self.s1;
            }
            self.s1 %= ADLER_MOD;
            self.s2 %= ADLER_MOD;
        }
    }

    /// Current checksum value
    pub fn finish(&self) -> u32 {
        (self.s2 << 16) | self.s1
    }
}

/// Compute the Adler-32 of a complete buffer
pub fn adler32(data: &[u8]) -> u32 {
    let mut adler = Adler32::new();
    adler.update(data);
    adler.finish()
}
