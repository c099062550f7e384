#![doc = r#"
Forward-only cursor over the raw bytes of a Standard MIDI File.

All multi-byte fields in SMF are big-endian ("network" order), and
delta-times use the MIDI variable-length quantity encoding. The
[`Reader`] provides typed reads for all three, tracking its position so
errors can point at the offending byte.
"#]

mod error;
pub use error::*;

use crate::EventError;

/// A delta-time may not span more than 4 VLQ bytes.
pub const DELTA_TIME_MAX_BYTES: usize = 4;

/// A sequential reader over a MIDI byte stream.
///
/// The cursor only ever moves forward; its position is the sole piece of
/// mutable state.
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a new reader over a byte slice.
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Returns the current offset into the underlying buffer.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Read exactly `n` bytes, advancing the cursor, or fail if fewer remain.
    pub fn read_exact(&mut self, n: usize) -> ReadResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| ReaderError::oob(self.position))?;
        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        Ok(self.read_exact(1)?[0])
    }

    /// Read a big-endian `u16`.
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        let bytes = self.read_exact(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a big-endian `u32`.
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        let bytes = self.read_exact(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Decode a variable-length quantity (a delta-time).
    ///
    /// Each byte contributes its low 7 bits; the high bit marks
    /// continuation. A conforming value terminates within
    /// [`DELTA_TIME_MAX_BYTES`] bytes; anything longer is a corrupt
    /// stream and fails with [`EventError::VlqTooLong`].
    pub fn read_vlq(&mut self) -> ReadResult<u32> {
        let start = self.position;
        let mut value: u32 = 0;
        for _ in 0..DELTA_TIME_MAX_BYTES {
            let byte = self.read_u8()?;
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(ReaderError::parse_error(start, EventError::VlqTooLong))
    }
}

/// Encode a value as a variable-length quantity.
///
/// The inverse of [`Reader::read_vlq`]. Values up to `2^28 - 1` fit in the
/// 4 bytes a delta-time may occupy.
pub fn encode_vlq(value: u32) -> Vec<u8> {
    debug_assert!(value <= 0x0FFF_FFFF, "VLQ value does not fit in 4 bytes");
    let mut buf = [0u8; DELTA_TIME_MAX_BYTES];
    let mut at = DELTA_TIME_MAX_BYTES - 1;
    buf[at] = (value & 0x7F) as u8;
    let mut rest = value >> 7;
    while rest != 0 {
        at -= 1;
        buf[at] = (rest & 0x7F) as u8 | 0x80;
        rest >>= 7;
    }
    buf[at..].to_vec()
}
