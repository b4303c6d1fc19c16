//! Bytecode input abstraction.
//!
//! This module abstracts over the different ways raw EVM bytecode reaches the
//! disassembler: memory-mapped files on disk, in-memory buffers, and textual hex
//! dumps (the common `0x60806040...` form contracts are published in). The
//! decoding core only ever sees a normalized `&[u8]`; all text handling ends here.
//!
//! # Key Components
//!
//! - [`crate::file::File`] - Main input facade over a pluggable [`crate::file::Backend`]
//! - [`crate::file::Backend`] - Trait for data sources (disk files, memory buffers)
//! - [`crate::file::physical::Physical`] - Memory-mapped file backend
//! - [`crate::file::memory::Memory`] - Owned in-memory buffer backend
//! - [`crate::file::parser::Parser`] - Bounds-checked cursor used by the decoder
//!
//! # Usage Examples
//!
//! ```rust
//! use evmscope::File;
//!
//! // Hex text, with or without the 0x prefix, any case, whitespace ignored
//! let file = File::from_hex("0x6005 6003 0100")?;
//! assert_eq!(file.data(), &[0x60, 0x05, 0x60, 0x03, 0x01, 0x00]);
//! # Ok::<(), evmscope::Error>(())
//! ```

pub(crate) mod memory;
pub mod parser;
pub(crate) mod physical;

use std::path::Path;

use crate::{file::memory::Memory, file::physical::Physical, Result};

/// Trait abstracting the data source a [`File`] reads bytecode from.
///
/// Implementations provide immutable access to the full byte contents. Both
/// backends are read-only; nothing in the pipeline mutates input data.
pub trait Backend: Send + Sync {
    /// Full contents of the data source.
    fn data(&self) -> &[u8];

    /// Total length in bytes.
    fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if the source holds no data.
    fn is_empty(&self) -> bool {
        self.data().is_empty()
    }
}

/// Input facade handing normalized bytecode to the disassembler.
///
/// A `File` wraps one [`Backend`] and guarantees that [`File::data`] is raw
/// bytecode: constructors that accept text perform hex normalization up front,
/// so the decoding core never parses text encodings.
pub struct File {
    backend: Box<dyn Backend>,
}

impl File {
    /// Load bytecode from a file on disk.
    ///
    /// The file is memory-mapped. If its contents look like a textual hex dump
    /// (only hex digits, whitespace, and an optional `0x` prefix), it is decoded
    /// to raw bytes; otherwise the contents are taken as raw bytecode verbatim.
    /// An empty file is valid input and yields empty bytecode; every downstream
    /// stage renders it as empty output.
    ///
    /// # Arguments
    /// * `path` - Path of the file to load
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped,
    /// and [`crate::Error::Malformed`] if hex-looking contents have an odd digit
    /// count.
    pub fn from_file(path: &Path) -> Result<Self> {
        // Zero-length files cannot be mapped; hand them through directly.
        if std::fs::metadata(path)?.len() == 0 {
            return Ok(Self::from_mem(Vec::new()));
        }

        let physical = Physical::new(path)?;

        if let Ok(text) = std::str::from_utf8(physical.data()) {
            if looks_like_hex(text) {
                return Self::from_hex(text);
            }
        }

        Ok(File {
            backend: Box::new(physical),
        })
    }

    /// Wrap an owned byte buffer as bytecode input.
    #[must_use]
    pub fn from_mem(data: Vec<u8>) -> Self {
        File {
            backend: Box::new(Memory::new(data)),
        }
    }

    /// Decode a textual hex dump into bytecode input.
    ///
    /// Accepts upper or lower case digits, arbitrary interior whitespace, and any
    /// number of `0x` prefixes (some dump formats prefix every line).
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for non-hex characters or an odd number
    /// of digits.
    pub fn from_hex(text: &str) -> Result<Self> {
        Ok(Self::from_mem(decode_hex(text)?))
    }

    /// The normalized bytecode.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.backend.data()
    }

    /// Bytecode length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// Returns `true` if the input holds no bytecode.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }
}

/// Returns `true` if `text` consists solely of hex digits, whitespace, and
/// `0x` prefixes - the shape of a textual bytecode dump.
#[must_use]
pub fn looks_like_hex(text: &str) -> bool {
    let stripped: String = text.split_whitespace().collect::<Vec<_>>().join("");
    let stripped = stripped.replace("0x", "").replace("0X", "");

    !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Normalize and decode a hex dump to raw bytes.
fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let normalized: String = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("")
        .replace("0x", "")
        .replace("0X", "")
        .to_lowercase();

    if normalized.len() % 2 != 0 {
        return Err(malformed_error!(
            "Hex input has odd length: {}",
            normalized.len()
        ));
    }

    let mut bytes = Vec::with_capacity(normalized.len() / 2);
    let digits = normalized.as_bytes();
    for pair in digits.chunks_exact(2) {
        let hi = hex_digit(pair[0])?;
        let lo = hex_digit(pair[1])?;
        bytes.push((hi << 4) | lo);
    }

    Ok(bytes)
}

fn hex_digit(byte: u8) -> Result<u8> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        _ => Err(malformed_error!("Invalid hex digit: {}", byte as char)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let file = File::from_hex("600560030100").unwrap();
        assert_eq!(file.data(), &[0x60, 0x05, 0x60, 0x03, 0x01, 0x00]);
    }

    #[test]
    fn hex_normalization() {
        let file = File::from_hex("0x60 05\n0x60 03\t01 00").unwrap();
        assert_eq!(file.data(), &[0x60, 0x05, 0x60, 0x03, 0x01, 0x00]);

        let upper = File::from_hex("0xFFAA").unwrap();
        assert_eq!(upper.data(), &[0xff, 0xaa]);
    }

    #[test]
    fn hex_odd_length_rejected() {
        assert!(File::from_hex("0x123").is_err());
    }

    #[test]
    fn hex_invalid_digit_rejected() {
        assert!(File::from_hex("60zz").is_err());
    }

    #[test]
    fn hex_detection() {
        assert!(looks_like_hex("0x600560"));
        assert!(looks_like_hex("FF AA\n00"));
        assert!(!looks_like_hex("not bytecode"));
        assert!(!looks_like_hex(""));
    }

    #[test]
    fn from_mem_passthrough() {
        let file = File::from_mem(vec![0x00, 0x5b]);
        assert_eq!(file.len(), 2);
        assert!(!file.is_empty());
    }

    #[test]
    fn empty_file_is_valid_input() {
        let mut path = std::env::temp_dir();
        path.push("evmscope_empty_input_test.bin");
        std::fs::File::create(&path).unwrap();

        let file = File::from_file(&path).unwrap();
        assert!(file.is_empty());
        assert_eq!(file.data(), &[] as &[u8]);

        let _ = std::fs::remove_file(&path);
    }
}
