//! Low-level byte stream cursor for bytecode decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a bounds-checked cursor over
//! a byte slice. The disassembler drives it one opcode byte at a time; push-class operands are
//! read big-endian with the width clamped to the remaining data, so a stream that ends in the
//! middle of a push still decodes (the available bytes become a shorter literal).
//!
//! # Usage Examples
//!
//! ```rust
//! use evmscope::Parser;
//!
//! let data = [0x60, 0x05, 0x01];
//! let mut parser = Parser::new(&data);
//!
//! let opcode = parser.read_u8()?;
//! assert_eq!(opcode, 0x60);
//!
//! // PUSH1 wants one operand byte
//! let (value, read) = parser.read_operand(1);
//! assert_eq!(value, 0x05.into());
//! assert_eq!(read, 1);
//! # Ok::<(), evmscope::Error>(())
//! ```

use primitive_types::U256;

use crate::{Error::OutOfBounds, Result};

/// A cursor-based parser over raw bytecode.
///
/// `Parser` maintains a position within a byte slice and provides bounds-checked
/// sequential access. Reads past the end of the data either fail ([`Parser::read_u8`])
/// or clamp ([`Parser::read_operand`]); the clamping behavior is what makes the
/// linear-sweep decoder total over arbitrary input.
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Move the current position to the specified index.
    ///
    /// Seeking to exactly the end of the data is allowed; it leaves the parser in
    /// the exhausted state that [`Parser::has_more_data`] reports as `false`.
    ///
    /// # Arguments
    /// * `pos` - The position to move the cursor to
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the position is beyond the data length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(OutOfBounds);
        }

        self.position = pos;
        Ok(())
    }

    /// Read a single byte and advance the cursor.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if no data remains.
    pub fn read_u8(&mut self) -> Result<u8> {
        match self.data.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(OutOfBounds),
        }
    }

    /// Peek at the current byte without advancing.
    #[must_use]
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.position).copied()
    }

    /// Read up to `width` bytes as a big-endian unsigned integer.
    ///
    /// The width is clamped to the remaining data, so a truncated push operand
    /// decodes as a shorter literal instead of failing. Returns the decoded value
    /// together with the number of bytes actually consumed; the caller compares
    /// that count against the declared width to detect truncation.
    ///
    /// `width` must be at most 32 (the largest push operand).
    pub fn read_operand(&mut self, width: u8) -> (U256, u8) {
        debug_assert!(width as usize <= 32);

        let remaining = self.data.len() - self.position;
        let take = (width as usize).min(remaining);

        let value = U256::from_big_endian(&self.data[self.position..self.position + take]);
        self.position += take;

        #[allow(clippy::cast_possible_truncation)]
        (value, take as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_u8_sequential() {
        let data = [0x01, 0x02];
        let mut parser = Parser::new(&data);

        assert_eq!(parser.read_u8().unwrap(), 0x01);
        assert_eq!(parser.read_u8().unwrap(), 0x02);
        assert!(parser.read_u8().is_err());
    }

    #[test]
    fn read_operand_big_endian() {
        let data = [0x12, 0x34, 0x56];
        let mut parser = Parser::new(&data);

        let (value, read) = parser.read_operand(3);
        assert_eq!(read, 3);
        assert_eq!(value, U256::from(0x123456));
        assert!(!parser.has_more_data());
    }

    #[test]
    fn read_operand_clamps_at_end() {
        let data = [0xff, 0xaa];
        let mut parser = Parser::new(&data);

        let (value, read) = parser.read_operand(32);
        assert_eq!(read, 2);
        assert_eq!(value, U256::from(0xffaa));
        assert_eq!(parser.pos(), 2);
    }

    #[test]
    fn read_operand_empty_is_zero() {
        let data = [];
        let mut parser = Parser::new(&data);

        let (value, read) = parser.read_operand(4);
        assert_eq!(read, 0);
        assert_eq!(value, U256::zero());
    }

    #[test]
    fn seek_bounds() {
        let data = [0x01, 0x02, 0x03];
        let mut parser = Parser::new(&data);

        parser.seek(3).unwrap();
        assert!(!parser.has_more_data());
        assert!(parser.seek(4).is_err());
    }
}
