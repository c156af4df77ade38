//! stbcomp - Rust implementation of the stb_compress stream format
//!
//! This crate provides a pure Rust implementation of the compressor from Sean
//! Barrett's stb library, the format Dear ImGui uses for fonts embedded in
//! source code (`binary_to_compressed_c`). It is a byte-oriented LZ77 scheme
//! without entropy coding: literal runs and back-references are written as
//! short big-endian opcodes, and an Adler-32 of the input closes the stream.
//!
//! # Features
//!
//! - Compression producing streams readable by `stb_decompress`
//! - Four-context hash probing with a 256 KiB window
//! - Output to a `Vec<u8>`, a fixed buffer or any `std::io::Write`
//! - C/C++ source emission as `u8`, `u32` or Base85 arrays
//! - `#define`s for icon font code points as UTF-8 string literals
//!
//! # Stream format
//!
//! ```text
//! offset 0:  0x57 0xBC       magic
//! offset 2:  u16 0           reserved
//! offset 4:  u32 0           high word of a 64-bit length
//! offset 8:  u32             original length
//! offset 12: u32             window size
//! offset 16: opcodes and literal bytes
//!            u16 0x05FA      end of stream
//!            u32             Adler-32 of the original input
//! ```
//!
//! # Example - Compression
//!
//! ```
//! use stbcomp::{adler32, compress_bytes, StreamHeader};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let compressed = compress_bytes(data)?;
//!
//! let header = StreamHeader::parse(&compressed)?;
//! assert_eq!(header.original_len as usize, data.len());
//! assert_eq!(StreamHeader::trailer(&compressed), Some(adler32(data)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Source emission
//!
//! ```
//! use stbcomp::{embed_bytes, EmbedOptions, SourceEncoding};
//!
//! let options = EmbedOptions {
//!     encoding: SourceEncoding::Base85,
//!     ..EmbedOptions::default()
//! };
//! let source = embed_bytes(b"font bytes", "Font.ttf", "Font", &options)?;
//! assert!(source.contains("Font_compressed_data_base85"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod adler32;
pub mod common;
pub mod compress;
pub mod embed;
pub mod error;

// Re-export commonly used types
pub use adler32::{adler32, Adler32};
pub use common::{
    CompressOptions, CompressionStats, Result, StbError, StreamHeader, DEFAULT_HASH_SIZE,
    DEFAULT_WINDOW, END_OPCODE, HEADER_SIZE, MAGIC, MAX_LITERAL_RUN, MAX_MATCH_LENGTH,
    MAX_WINDOW, TRAILER_SIZE,
};
pub use compress::{
    compress_into, compress_to_writer, compress_with, max_compressed_len, CompressState,
};
pub use embed::{
    codepoint_define, codepoint_defines, embed_bytes, parse_codepoint_pairs, symbol_from_path,
    write_source, EmbedOptions, SourceEncoding,
};

// Convenience functions

/// Compress data using the stb_compress algorithm
///
/// # Arguments
/// * `data` - The data to compress (at most `u32::MAX` bytes)
///
/// # Returns
/// A vector containing the complete compressed stream
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    compress::compress_bytes(data)
}
