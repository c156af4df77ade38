//! Shared helpers for integration tests
//!
//! Contains a reference decoder for the stb_compress stream format, used to
//! check that compressed streams reproduce their input, and deterministic
//! data generators shared with the compatibility fixtures.

#![allow(dead_code)]

/// One decoded opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Run of verbatim bytes
    Literal(usize),
    /// Back-reference
    Match { length: usize, distance: usize },
}

/// Result of decoding a full stream
#[derive(Debug)]
pub struct Decoded {
    pub data: Vec<u8>,
    pub ops: Vec<Op>,
    pub window: u32,
    pub checksum: u32,
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], String> {
        let end = self.pos + n;
        if end > self.data.len() {
            return Err(format!("truncated stream at offset {}", self.pos));
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn be(&mut self, n: usize) -> Result<usize, String> {
        Ok(self
            .take(n)?
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | b as usize))
    }
}

/// Decode a complete stream, verifying framing, length and checksum
pub fn decode(stream: &[u8]) -> Result<Decoded, String> {
    let mut cur = Cursor {
        data: stream,
        pos: 0,
    };

    if cur.take(2)? != [0x57, 0xBC] {
        return Err("bad magic".into());
    }
    if cur.be(2)? != 0 || cur.be(4)? != 0 {
        return Err("reserved header fields not zero".into());
    }
    let length = cur.be(4)?;
    let window = cur.be(4)? as u32;

    let mut out: Vec<u8> = Vec::with_capacity(length);
    let mut ops = Vec::new();

    loop {
        let tag = *cur
            .data
            .get(cur.pos)
            .ok_or_else(|| "missing end opcode".to_string())?;

        let (length, distance) = match tag {
            0x80..=0xFF => {
                let b = cur.take(2)?;
                (b[0] as usize - 0x80 + 1, b[1] as usize + 1)
            }
            0x40..=0x7F => {
                let d = cur.be(2)? - 0x4000 + 1;
                (cur.be(1)? + 1, d)
            }
            0x20..=0x3F => {
                let n = cur.be(1)? - 0x20 + 1;
                copy_literals(&mut cur, &mut out, &mut ops, n)?;
                continue;
            }
            0x18..=0x1F => {
                let d = cur.be(3)? - 0x18_0000 + 1;
                (cur.be(1)? + 1, d)
            }
            0x10..=0x17 => {
                let d = cur.be(3)? - 0x10_0000 + 1;
                (cur.be(2)? + 1, d)
            }
            0x08..=0x0F => {
                let n = cur.be(2)? - 0x0800 + 1;
                copy_literals(&mut cur, &mut out, &mut ops, n)?;
                continue;
            }
            0x07 => {
                let n = cur.be(3)? - 0x07_0000 + 1;
                copy_literals(&mut cur, &mut out, &mut ops, n)?;
                continue;
            }
            0x06 => {
                cur.take(1)?;
                let d = cur.be(3)? + 1;
                (cur.be(1)? + 1, d)
            }
            0x04 => {
                cur.take(1)?;
                let d = cur.be(3)? + 1;
                (cur.be(2)? + 1, d)
            }
            0x05 => {
                if cur.be(2)? != 0x05FA {
                    return Err("bad end opcode".into());
                }
                break;
            }
            other => return Err(format!("unknown opcode {other:#04x}")),
        };

        if distance == 0 || distance > out.len() {
            return Err(format!(
                "match distance {distance} reaches before start (at {})",
                out.len()
            ));
        }
        let from = out.len() - distance;
        for i in 0..length {
            let byte = out[from + i];
            out.push(byte);
        }
        ops.push(Op::Match { length, distance });
    }

    let checksum = cur.be(4)? as u32;
    if cur.pos != stream.len() {
        return Err("trailing bytes after checksum".into());
    }
    if out.len() != length {
        return Err(format!("decoded {} bytes, header says {length}", out.len()));
    }
    if stbcomp::adler32(&out) != checksum {
        return Err("checksum mismatch".into());
    }

    Ok(Decoded {
        data: out,
        ops,
        window,
        checksum,
    })
}

fn copy_literals(
    cur: &mut Cursor<'_>,
    out: &mut Vec<u8>,
    ops: &mut Vec<Op>,
    n: usize,
) -> Result<(), String> {
    out.extend_from_slice(cur.take(n)?);
    ops.push(Op::Literal(n));
    Ok(())
}

/// Linear congruential generator matching the fixture generator
pub struct Lcg(u32);

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12345);
        (self.0 >> 16) & 0x7FFF
    }

    pub fn byte(&mut self) -> u8 {
        self.next() as u8
    }
}

pub fn random_bytes(seed: u32, n: usize) -> Vec<u8> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.byte()).collect()
}

pub fn lorem(n: usize) -> Vec<u8> {
    let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
    base.iter().copied().cycle().take(n).collect()
}

pub fn ramp(n: usize) -> Vec<u8> {
    (0..n).map(|i| ((i * 17 + 11) % 256) as u8).collect()
}

/// 40 KB block, 300 KB of noise, then the first block again (beyond the window)
pub fn far_repeat() -> Vec<u8> {
    let a = random_bytes(3, 40_000);
    let mut data = a.clone();
    data.extend(random_bytes(5, 300_000));
    data.extend(a);
    data
}

/// Random literals interleaved with copies from up to 70000 bytes back
pub fn mixed() -> Vec<u8> {
    let mut rng = Lcg::new(11);
    let mut out: Vec<u8> = Vec::new();
    for _ in 0..4000 {
        if out.len() < 16 || rng.next() % 3 == 0 {
            let n = 1 + rng.next() % 40;
            for _ in 0..n {
                out.push(rng.byte());
            }
        } else {
            let n = 3 + rng.next() % 300;
            let hi = rng.next() as usize;
            let lo = rng.next() as usize;
            let d = 1 + (hi * 32768 + lo) % out.len().min(70_000);
            let start = out.len() - d;
            for i in 0..n as usize {
                let byte = out[start + i];
                out.push(byte);
            }
        }
    }
    out
}
