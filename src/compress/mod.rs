//! stb_compress (compression) implementation
//!
//! This module provides the LZ77-style compressor producing the stream format
//! understood by `stb_decompress`. Matches are found by probing a single
//! direct-mapped hash table at four context lengths, and the whole input is
//! compressed in one pass.

mod encoder;
mod hash;
mod pattern;
mod sink;
mod state;

pub use encoder::MatchOpcode;
pub use pattern::{worth_encoding, MatchResult};
pub use sink::{OutputSink, SliceSink, StreamSink};
pub use state::CompressState;

use crate::{CompressOptions, CompressionStats, Result, HEADER_SIZE, TRAILER_SIZE};
use std::io::Write;

/// Upper bound on the compressed size of `len` input bytes
///
/// Incompressible input only grows by the header, trailer and one literal
/// opcode per 64 KiB, so this bound is generous.
pub const fn max_compressed_len(len: usize) -> usize {
    len + 512 + len / 4 + HEADER_SIZE + TRAILER_SIZE
}

/// Compress data in memory with the default window and hash table size
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let (output, _) = compress_with(data, &CompressOptions::default())?;
    Ok(output)
}

/// Compress data in memory with explicit options, returning the call statistics
pub fn compress_with(
    data: &[u8],
    options: &CompressOptions,
) -> Result<(Vec<u8>, CompressionStats)> {
    let mut state = CompressState::new(*options)?;
    let mut output = Vec::with_capacity(data.len() / 2 + HEADER_SIZE + TRAILER_SIZE);
    state.compress(data, &mut output)?;
    Ok((output, state.stats()))
}

/// Compress into a caller-provided buffer, returning the compressed length
///
/// A buffer of [`max_compressed_len`] bytes is always large enough.
pub fn compress_into(data: &[u8], out: &mut [u8]) -> Result<usize> {
    let mut state = CompressState::new(CompressOptions::default())?;
    let mut sink = SliceSink::new(out);
    state.compress(data, &mut sink)?;
    Ok(sink.written())
}

/// Compress straight into a writer, returning the number of bytes written
pub fn compress_to_writer<W: Write>(data: &[u8], writer: W) -> Result<u64> {
    let mut state = CompressState::new(CompressOptions::default())?;
    let mut sink = StreamSink::new(writer);
    state.compress(data, &mut sink)?;
    let written = sink.written() as u64;
    sink.finish()?;
    Ok(written)
}
