//! Opcode encoding and the stream driver
//!
//! Opcodes are distinguished by their leading byte:
//!
//! | Leading byte | Meaning | Layout |
//! |---|---|---|
//! | `0x80..=0xFF` | match, len ≤ 128, dist ≤ 256 | `0x80+len-1`, `dist-1` |
//! | `0x40..=0x7F` | match, len ≤ 256, dist ≤ 16K | u16 `0x4000+dist-1`, `len-1` |
//! | `0x20..=0x3F` | literals, n ≤ 32 | `0x20+n-1`, bytes |
//! | `0x18..=0x1F` | match, len ≤ 256, dist ≤ 512K | u24 `0x180000+dist-1`, `len-1` |
//! | `0x10..=0x17` | match, len ≤ 64K, dist ≤ 512K | u24 `0x100000+dist-1`, u16 `len-1` |
//! | `0x08..=0x0F` | literals, n ≤ 2048 | u16 `0x0800+n-1`, bytes |
//! | `0x07` | literals, n ≤ 64K | u24 `0x070000+n-1`, bytes |
//! | `0x06` | match, len ≤ 256, dist ≤ 16M | `0x06`, u24 `dist-1`, `len-1` |
//! | `0x05 0xFA` | end of stream | followed by u32 Adler-32 |
//! | `0x04` | match, len ≤ 64K, dist ≤ 16M | `0x04`, u24 `dist-1`, u16 `len-1` |

use super::hash::HASH_CONTEXT;
use super::sink::OutputSink;
use super::state::CompressState;
use crate::{Result, StbError, END_OPCODE, MAGIC, MAX_LITERAL_RUN, MAX_MATCH_LENGTH};

/// A match opcode selected for a (length, distance) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOpcode {
    /// One-byte length, one-byte distance
    Near {
        /// Match length
        length: usize,
        /// Backward distance
        distance: usize,
    },
    /// Two-byte distance, one-byte length
    Mid {
        /// Match length
        length: usize,
        /// Backward distance
        distance: usize,
    },
    /// Three-byte distance, one-byte length
    Far {
        /// Match length
        length: usize,
        /// Backward distance
        distance: usize,
    },
    /// Three-byte distance, two-byte length
    FarLong {
        /// Match length
        length: usize,
        /// Backward distance
        distance: usize,
    },
    /// Tag `0x06`, three-byte distance, one-byte length
    Huge {
        /// Match length
        length: usize,
        /// Backward distance
        distance: usize,
    },
    /// Tag `0x04`, three-byte distance, two-byte length
    HugeLong {
        /// Match length
        length: usize,
        /// Backward distance
        distance: usize,
    },
}

impl MatchOpcode {
    /// Pick the tightest opcode able to carry the match, if any
    pub fn select(length: usize, distance: usize) -> Option<Self> {
        if length > 2 && length <= 0x80 && distance <= 0x100 {
            Some(Self::Near { length, distance })
        } else if length > 5 && length <= 0x100 && distance <= 0x4000 {
            Some(Self::Mid { length, distance })
        } else if length > 7 && length <= 0x100 && distance <= 0x80000 {
            Some(Self::Far { length, distance })
        } else if length > 8 && length <= 0x10000 && distance <= 0x80000 {
            Some(Self::FarLong { length, distance })
        } else if length > 9 && distance <= 0x100_0000 {
            let length = length.min(MAX_MATCH_LENGTH);
            if length <= 0x100 {
                Some(Self::Huge { length, distance })
            } else {
                Some(Self::HugeLong { length, distance })
            }
        } else {
            None
        }
    }

    /// Number of input bytes the opcode covers
    pub fn length(&self) -> usize {
        match *self {
            Self::Near { length, .. }
            | Self::Mid { length, .. }
            | Self::Far { length, .. }
            | Self::FarLong { length, .. }
            | Self::Huge { length, .. }
            | Self::HugeLong { length, .. } => length,
        }
    }

    /// Write the opcode bytes
    pub fn write<S: OutputSink>(&self, sink: &mut S) -> Result<()> {
        match *self {
            Self::Near { length, distance } => {
                sink.write1(0x80 + length as u32 - 1)?;
                sink.write1(distance as u32 - 1)
            }
            Self::Mid { length, distance } => {
                sink.write2(0x4000 + distance as u32 - 1)?;
                sink.write1(length as u32 - 1)
            }
            Self::Far { length, distance } => {
                sink.write3(0x18_0000 + distance as u32 - 1)?;
                sink.write1(length as u32 - 1)
            }
            Self::FarLong { length, distance } => {
                sink.write3(0x10_0000 + distance as u32 - 1)?;
                sink.write2(length as u32 - 1)
            }
            Self::Huge { length, distance } => {
                sink.write1(0x06)?;
                sink.write3(distance as u32 - 1)?;
                sink.write1(length as u32 - 1)
            }
            Self::HugeLong { length, distance } => {
                sink.write1(0x04)?;
                sink.write3(distance as u32 - 1)?;
                sink.write2(length as u32 - 1)
            }
        }
    }
}

/// Write the opcode introducing a literal run of `n` bytes (1..=65536)
fn write_literal_opcode<S: OutputSink>(sink: &mut S, n: usize) -> Result<()> {
    let n = n as u32;
    match n {
        1..=32 => sink.write1(0x20 + n - 1),
        33..=2048 => sink.write2(0x0800 + n - 1),
        _ => sink.write3(0x07_0000 + n - 1),
    }
}

impl CompressState {
    /// Emit a pending literal run, split into chunks of at most 64 KiB
    pub fn emit_literals<S: OutputSink>(&mut self, sink: &mut S, run: &[u8]) -> Result<()> {
        if run.len() > MAX_LITERAL_RUN {
            log::trace!(
                "splitting {} literal bytes into {} chunks",
                run.len(),
                run.len().div_ceil(MAX_LITERAL_RUN)
            );
        }

        for chunk in run.chunks(MAX_LITERAL_RUN) {
            write_literal_opcode(sink, chunk.len())?;
            sink.put(chunk)?;
            self.stats.literal_runs += 1;
        }
        self.stats.literal_count += run.len();
        Ok(())
    }

    /// Compress `data` as one complete stream into `sink`
    ///
    /// The hash table, checksum and statistics are reset first, so a state
    /// can be reused without leaking anything from a previous call.
    pub fn compress<S: OutputSink>(&mut self, data: &[u8], sink: &mut S) -> Result<()> {
        let length = u32::try_from(data.len()).map_err(|_| StbError::InputTooLarge(data.len()))?;
        self.reset();
        let start = sink.written();

        sink.put(&MAGIC)?;
        sink.write2(0)?;
        // High word of a 64-bit length
        sink.write4(0)?;
        sink.write4(length)?;
        sink.write4(self.options.window)?;

        let mut pos = 0;
        let mut lit_start = 0;

        // Hashing reads 13 bytes ahead, so the tail always ends up as literals
        while pos + HASH_CONTEXT <= data.len() {
            let found = self.find_match(data, pos);
            let opcode = if found.is_match() {
                MatchOpcode::select(found.length, found.distance)
            } else {
                None
            };

            match opcode {
                Some(opcode) => {
                    self.emit_literals(sink, &data[lit_start..pos])?;
                    opcode.write(sink)?;
                    pos += opcode.length();
                    self.adler.update(&data[lit_start..pos]);
                    lit_start = pos;

                    self.stats.match_count += 1;
                    self.stats.longest_match = self.stats.longest_match.max(opcode.length());
                }
                None => pos += 1,
            }
        }

        self.emit_literals(sink, &data[lit_start..])?;
        self.adler.update(&data[lit_start..]);

        sink.write2(END_OPCODE as u32)?;
        sink.write4(self.adler.finish())?;

        self.stats.bytes_processed = data.len();
        self.stats.compressed_bytes = sink.written() - start;

        log::debug!(
            "compressed {} -> {} bytes ({} matches, {} literal bytes in {} runs)",
            data.len(),
            self.stats.compressed_bytes,
            self.stats.match_count,
            self.stats.literal_count,
            self.stats.literal_runs
        );

        Ok(())
    }
}
