//! Compression context
//!
//! Everything one compression call mutates lives in [`CompressState`]: the
//! hash table, the running checksum and the statistics. A state is built
//! fresh for every call and dropped at its end, so concurrent compressions
//! never share anything.

use crate::adler32::Adler32;
use crate::{CompressOptions, CompressionStats, Result, StbError};

/// Per-call compression state
#[derive(Debug)]
pub struct CompressState {
    /// Window size and hash table size for this call
    pub options: CompressOptions,
    /// Hash table: most recent input offset seen per slot
    pub table: Vec<Option<u32>>,
    /// Mask applied to scrambled hashes
    pub mask: u32,
    /// Checksum of the input consumed so far
    pub adler: Adler32,
    /// Counters for the current call
    pub stats: CompressionStats,
}

impl CompressState {
    /// Create a new compression state
    ///
    /// Fails if the options are invalid or the hash table cannot be allocated.
    pub fn new(options: CompressOptions) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            options,
            table: allocate_table(options.hash_size)?,
            mask: options.hash_mask(),
            adler: Adler32::new(),
            stats: CompressionStats::default(),
        })
    }

    /// Reset state for a new compression
    pub fn reset(&mut self) {
        self.table.fill(None);
        self.adler = Adler32::new();
        self.stats = CompressionStats::default();
    }

    /// Get current compression statistics
    pub fn stats(&self) -> CompressionStats {
        let mut stats = self.stats.clone();
        stats.compression_ratio = if stats.bytes_processed > 0 {
            (stats.compressed_bytes as f64) / (stats.bytes_processed as f64)
        } else {
            0.0
        };
        stats
    }
}

/// Allocate an empty hash table of `slots` entries without aborting on failure
fn allocate_table(slots: usize) -> Result<Vec<Option<u32>>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(slots)
        .map_err(|_| StbError::HashTableAllocation { slots })?;
    table.resize(slots, None);
    Ok(table)
}
