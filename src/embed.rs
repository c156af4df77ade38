//! C/C++ source emitter
//!
//! Renders a (usually compressed) payload as a C array declaration so it can
//! be compiled straight into a program, the way Dear ImGui embeds its fonts.
//! Three encodings are available:
//!
//! - `U8`: `unsigned char` array, about 12 bytes of source per 4 bytes of data
//! - `U32`: `unsigned int` array of little-endian words, about 11 bytes of
//!   source per 4 bytes of data (needs byte swapping on big-endian targets)
//! - `Base85`: string literal, about 5 bytes of source per 4 bytes of data
//!   (needs a decoder at runtime)
//!
//! It also generates `#define`s for icon font code points, so glyphs of an
//! embedded icon font can be referenced by name from C/C++ strings.

use crate::{compress::compress_bytes, Result, StbError};
use std::collections::HashMap;
use std::io::Write;

/// Source encoding of the emitted array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceEncoding {
    /// `unsigned char` array of decimal bytes
    #[default]
    U8,
    /// `unsigned int` array of hexadecimal little-endian words
    U32,
    /// Base85 string literal
    Base85,
}

impl SourceEncoding {
    /// Flag naming this encoding in the generated banner comment
    pub fn flag(&self) -> &'static str {
        match self {
            SourceEncoding::U8 => "-u8",
            SourceEncoding::U32 => "-u32",
            SourceEncoding::Base85 => "-base85",
        }
    }
}

/// Options controlling the generated declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Array encoding
    pub encoding: SourceEncoding,
    /// Whether the payload is stb-compressed
    pub compress: bool,
    /// Whether the symbols are declared `static`
    pub static_symbol: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            encoding: SourceEncoding::U8,
            compress: true,
            static_symbol: true,
        }
    }
}

/// Bytes of array values per line before wrapping in `U8` mode
const U8_LINE_WIDTH: usize = 180;

/// Words per line in `U32` mode
const U32_WORDS_PER_LINE: usize = 14;

/// Source bytes consumed per line in `Base85` mode
const BASE85_LINE_BYTES: usize = 112;

/// Derive a symbol name from a file path
///
/// Takes the file name after the last separator and cuts it at the first
/// `.`, so `fonts/Roboto.Medium.ttf` becomes `Roboto`.
pub fn symbol_from_path(path: &str) -> String {
    let name = path
        .rsplit(|c: char| c == '/' || (cfg!(windows) && c == '\\'))
        .next()
        .unwrap_or(path);
    match name.find('.') {
        Some(dot) => name[..dot].to_string(),
        None => name.to_string(),
    }
}

/// Map the low base-85 digit of `x` onto a printable character, skipping `\`
pub fn encode85_byte(x: u32) -> u8 {
    let x = (x % 85) as u8 + 35;
    if x >= b'\\' {
        x + 1
    } else {
        x
    }
}

/// Little-endian words of `payload`, zero-padded to a multiple of four bytes
fn words(payload: &[u8]) -> impl Iterator<Item = u32> + '_ {
    payload.chunks(4).map(|chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        u32::from_le_bytes(word)
    })
}

/// Write `payload` as a C source declaration
///
/// `original_len` is the size of the input file reported in the banner,
/// `input_name` the path it was read from.
pub fn write_source<W: Write>(
    out: &mut W,
    payload: &[u8],
    original_len: usize,
    input_name: &str,
    symbol: &str,
    options: &EmbedOptions,
) -> Result<()> {
    let static_str = if options.static_symbol { "static " } else { "" };
    let compressed_str = if options.compress { "compressed_" } else { "" };
    let size = payload.len();

    writeln!(out, "// File: '{input_name}' ({original_len} bytes)")?;
    writeln!(
        out,
        "// Exported using binary_to_compressed_c {} \"{input_name}\" {symbol}",
        options.encoding.flag()
    )?;

    match options.encoding {
        SourceEncoding::Base85 => {
            write!(
                out,
                "{static_str}const char {symbol}_{compressed_str}data_base85[{}+1] =\n    \"",
                size.div_ceil(4) * 5
            )?;
            let mut prev = 0u8;
            for (index, word) in words(payload).enumerate() {
                let mut d = word;
                for _ in 0..5 {
                    let c = encode85_byte(d);
                    // "??x" would be read as a trigraph
                    if c == b'?' && prev == b'?' {
                        out.write_all(b"\\?")?;
                    } else {
                        out.write_all(&[c])?;
                    }
                    prev = c;
                    d /= 85;
                }
                if (index * 4) % BASE85_LINE_BYTES == BASE85_LINE_BYTES - 4 {
                    write!(out, "\"\n    \"")?;
                }
            }
            write!(out, "\";\n\n")?;
        }
        SourceEncoding::U8 => {
            writeln!(
                out,
                "{static_str}const unsigned int {symbol}_{compressed_str}size = {size};"
            )?;
            write!(
                out,
                "{static_str}const unsigned char {symbol}_{compressed_str}data[{size}] =\n{{"
            )?;
            let mut column = 0;
            for &byte in payload {
                if column == 0 {
                    write!(out, "\n    ")?;
                }
                let value = format!("{byte},");
                out.write_all(value.as_bytes())?;
                column += value.len();
                if column >= U8_LINE_WIDTH {
                    column = 0;
                }
            }
            write!(out, "\n}};\n\n")?;
        }
        SourceEncoding::U32 => {
            writeln!(
                out,
                "{static_str}const unsigned int {symbol}_{compressed_str}size = {size};"
            )?;
            write!(
                out,
                "{static_str}const unsigned int {symbol}_{compressed_str}data[{}/4] =\n{{",
                size.div_ceil(4) * 4
            )?;
            for (index, word) in words(payload).enumerate() {
                if index % U32_WORDS_PER_LINE == 0 {
                    write!(out, "\n    0x{word:08x}, ")?;
                } else {
                    write!(out, "0x{word:08x}, ")?;
                }
            }
            write!(out, "\n}};\n\n")?;
        }
    }

    Ok(())
}

/// Compress `data` (unless disabled) and render it as C source text
pub fn embed_bytes(
    data: &[u8],
    input_name: &str,
    symbol: &str,
    options: &EmbedOptions,
) -> Result<String> {
    let compressed;
    let payload = if options.compress {
        compressed = compress_bytes(data)?;
        &compressed[..]
    } else {
        data
    };

    let mut text = Vec::new();
    write_source(&mut text, payload, data.len(), input_name, symbol, options)?;
    String::from_utf8(text)
        .map_err(|e| StbError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Split `NAME=hex` pairs separated by whitespace
///
/// Words without an `=` are skipped.
pub fn parse_codepoint_pairs(input: &str) -> Vec<(&str, &str)> {
    input
        .split_whitespace()
        .filter_map(|part| part.split_once('='))
        .collect()
}

/// Render one `#define` holding the UTF-8 bytes of a code point
///
/// Returns `None` when `codepoint_hex` is not a valid Unicode scalar value.
pub fn codepoint_define(name: &str, codepoint_hex: &str) -> Option<String> {
    let codepoint = u32::from_str_radix(codepoint_hex, 16).ok()?;
    let c = char::from_u32(codepoint)?;
    let mut buf = [0u8; 4];
    let escaped: String = c
        .encode_utf8(&mut buf)
        .bytes()
        .map(|b| format!("\\x{b:02x}"))
        .collect();
    Some(format!(
        "#define {name} \"{escaped}\"  // U+{}",
        codepoint_hex.to_uppercase()
    ))
}

/// Generate icon font `#define`s for `(name, hex)` pairs
///
/// Names are upper-cased and prefixed with `prefix`; a name seen before gets
/// a `_1`, `_2`, ... suffix. Entries that cannot be converted produce an
/// `// Error:` comment line instead of a define.
pub fn codepoint_defines(prefix: &str, entries: &[(&str, &str)]) -> String {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = String::new();

    for &(name, hex) in entries {
        let name = name.trim().to_uppercase();
        let hex = hex.trim().to_lowercase();

        if name.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            out.push_str(&format!(
                "// Error: Invalid hex codepoint '{hex}' for {name}\n"
            ));
            continue;
        }

        let mut full_name = format!("{prefix}{name}");
        match seen.get_mut(&full_name) {
            Some(count) => {
                *count += 1;
                full_name = format!("{full_name}_{count}");
            }
            None => {
                seen.insert(full_name.clone(), 0);
            }
        }

        match codepoint_define(&full_name, &hex) {
            Some(define) => {
                out.push_str(&define);
                out.push('\n');
            }
            None => out.push_str(&format!(
                "// Error: Failed to convert codepoint '{hex}' for {full_name}\n"
            )),
        }
    }

    out
}
