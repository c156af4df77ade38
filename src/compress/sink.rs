//! Output sinks for the compressed stream
//!
//! All multi-byte quantities in the stream are big-endian. The encoder writes
//! through the [`OutputSink`] trait so the same code can fill a growable
//! `Vec<u8>`, a caller-provided slice, or any `std::io::Write`.

use crate::{Result, StbError};
use std::io::Write;

/// Destination for compressed bytes
pub trait OutputSink {
    /// Append raw bytes
    fn put(&mut self, bytes: &[u8]) -> Result<()>;

    /// Number of bytes written so far
    fn written(&self) -> usize;

    /// Write the low byte of `v`
    fn write1(&mut self, v: u32) -> Result<()> {
        self.put(&[v as u8])
    }

    /// Write the low 16 bits of `v`, big-endian
    fn write2(&mut self, v: u32) -> Result<()> {
        self.put(&[(v >> 8) as u8, v as u8])
    }

    /// Write the low 24 bits of `v`, big-endian
    fn write3(&mut self, v: u32) -> Result<()> {
        self.put(&[(v >> 16) as u8, (v >> 8) as u8, v as u8])
    }

    /// Write `v`, big-endian
    fn write4(&mut self, v: u32) -> Result<()> {
        self.put(&v.to_be_bytes())
    }
}

impl OutputSink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn written(&self) -> usize {
        self.len()
    }
}

/// Sink over a fixed, caller-sized buffer
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    /// Wrap `buf`; writing starts at its first byte
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl OutputSink for SliceSink<'_> {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            return Err(StbError::BufferTooSmall {
                needed: end,
                available: self.buf.len(),
            });
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    fn written(&self) -> usize {
        self.pos
    }
}

/// Sink forwarding to a byte stream
#[derive(Debug)]
pub struct StreamSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> StreamSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> OutputSink for StreamSink<W> {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    fn written(&self) -> usize {
        self.written
    }
}
