//! Common types and constants for the stb_compress stream format
//!
//! This module defines the options, error type, statistics and header view
//! shared by the compressor, the source emitter and the command-line tool.

use thiserror::Error;

/// Stream signature written at offset 0
pub const MAGIC: [u8; 2] = [0x57, 0xBC];

/// Size of the fixed stream header in bytes
pub const HEADER_SIZE: usize = 16;

/// End-of-stream opcode
pub const END_OPCODE: u16 = 0x05FA;

/// Size of the trailer (end opcode + Adler-32) in bytes
pub const TRAILER_SIZE: usize = 6;

/// Default maximum back-reference distance (256 KiB)
pub const DEFAULT_WINDOW: u32 = 0x40000;

/// Default number of hash table slots
pub const DEFAULT_HASH_SIZE: usize = 32768;

/// Largest distance any match opcode can carry
pub const MAX_WINDOW: u32 = 0x100_0000;

/// Longest match a single opcode can carry
pub const MAX_MATCH_LENGTH: usize = 0x10000;

/// Longest literal run a single literal opcode can carry
pub const MAX_LITERAL_RUN: usize = 0x10000;

/// Per-call compressor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Maximum back-reference distance, also recorded in the stream header
    pub window: u32,
    /// Number of hash table slots (power of two)
    pub hash_size: usize,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            hash_size: DEFAULT_HASH_SIZE,
        }
    }
}

impl CompressOptions {
    /// Replace the window size
    pub fn with_window(mut self, window: u32) -> Self {
        self.window = window;
        self
    }

    /// Replace the hash table size
    pub fn with_hash_size(mut self, hash_size: usize) -> Self {
        self.hash_size = hash_size;
        self
    }

    /// Check that the options describe a usable compressor
    pub fn validate(&self) -> Result<()> {
        if !self.hash_size.is_power_of_two() || self.hash_size > u32::MAX as usize {
            return Err(StbError::InvalidHashSize(self.hash_size));
        }
        if self.window == 0 || self.window > MAX_WINDOW {
            return Err(StbError::InvalidWindowSize(self.window));
        }
        Ok(())
    }

    /// Bit mask applied to scrambled hashes
    pub fn hash_mask(&self) -> u32 {
        (self.hash_size as u32).wrapping_sub(1)
    }
}

/// Error type for stbcomp operations
#[derive(Debug, Error)]
pub enum StbError {
    /// The hash table could not be allocated
    #[error("Failed to allocate hash table with {slots} slots")]
    HashTableAllocation {
        /// Requested number of slots
        slots: usize,
    },

    /// Hash table size is zero or not a power of two
    #[error("Invalid hash table size: {0} (expected a power of two)")]
    InvalidHashSize(usize),

    /// Window size is zero or too large for the opcode set
    #[error("Invalid window size: {0:#x} (expected 1..=0x1000000)")]
    InvalidWindowSize(u32),

    /// Input length does not fit in the 32-bit length field
    #[error("Input too large: {0} bytes (maximum is 4294967295)")]
    InputTooLarge(usize),

    /// Fixed output buffer is too small for the compressed stream
    #[error("Output buffer too small: needed at least {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required so far
        needed: usize,
        /// Bytes available in the buffer
        available: usize,
    },

    /// Existing stream does not start with a valid header
    #[error("Invalid stream header: {0}")]
    InvalidHeader(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for stbcomp operations
pub type Result<T> = std::result::Result<T, StbError>;

/// Statistics for a single compression call
#[derive(Debug, Default, Clone)]
pub struct CompressionStats {
    /// Input bytes consumed
    pub bytes_processed: usize,
    /// Output bytes produced, header and trailer included
    pub compressed_bytes: usize,
    /// Bytes emitted verbatim
    pub literal_count: usize,
    /// Literal opcodes emitted
    pub literal_runs: usize,
    /// Match opcodes emitted
    pub match_count: usize,
    /// Longest match emitted
    pub longest_match: usize,
    /// Compression ratio (compressed/original)
    pub compression_ratio: f64,
}

/// Decoded view of the fixed 16-byte stream header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    /// Length of the original input
    pub original_len: u32,
    /// Window size the stream was produced with
    pub window: u32,
}

impl StreamHeader {
    /// Parse the header at the start of a compressed stream
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(StbError::InvalidHeader(format!(
                "stream is {} bytes, header needs {}",
                data.len(),
                HEADER_SIZE
            )));
        }
        if data[..2] != MAGIC {
            return Err(StbError::InvalidHeader(format!(
                "bad magic {:02x} {:02x}",
                data[0], data[1]
            )));
        }
        if data[2..8].iter().any(|&b| b != 0) {
            return Err(StbError::InvalidHeader(
                "reserved fields are not zero (length above 4 GiB?)".to_string(),
            ));
        }

        Ok(Self {
            original_len: read_u32_be(data, 8),
            window: read_u32_be(data, 12),
        })
    }

    /// Return the trailing Adler-32 if the stream ends with a well-formed trailer
    pub fn trailer(data: &[u8]) -> Option<u32> {
        if data.len() < HEADER_SIZE + TRAILER_SIZE {
            return None;
        }
        let at = data.len() - TRAILER_SIZE;
        if u16::from_be_bytes([data[at], data[at + 1]]) != END_OPCODE {
            return None;
        }
        Some(read_u32_be(data, at + 2))
    }
}

fn read_u32_be(data: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
