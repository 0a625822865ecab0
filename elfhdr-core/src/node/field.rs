use byteorder::{BigEndian, ByteOrder, LittleEndian};
use goblin::elf::header::ELFDATA2LSB;

use super::Decode;
use crate::DecodeError;

/// Widest byte sequence that can be turned into an integer.
pub const INT_MAX_BYTE_LEN: usize = 4;

/// Byte order declared by the identity block's data byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// `ELFDATA2LSB` means little endian; every other value is read as big endian.
    pub fn from_data_byte(data: u8) -> Self {
        if data == ELFDATA2LSB {
            Endian::Little
        } else {
            Endian::Big
        }
    }
}

/// Folds up to four bytes into an integer, first byte most significant.
pub fn bytes_to_uint(bytes: &[u8]) -> Result<u32, DecodeError> {
    if bytes.len() > INT_MAX_BYTE_LEN {
        return Err(DecodeError::FieldTooWide { len: bytes.len() });
    }
    Ok(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
}

/// Leaf node of a statically known width, storing its slice verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedField {
    width: usize,
    raw: Vec<u8>,
}

impl FixedField {
    pub const fn new(width: usize) -> Self {
        Self {
            width,
            raw: Vec::new(),
        }
    }

    pub fn is_decoded(&self) -> bool {
        self.raw.len() == self.width
    }

    /// Value of the stored bytes in sequence order.
    pub fn to_uint(&self) -> Result<u32, DecodeError> {
        bytes_to_uint(&self.raw)
    }

    /// Value of the stored bytes in the given byte order. An undecoded field reads as 0.
    pub fn read_uint(&self, endian: Endian) -> Result<u32, DecodeError> {
        let value = match self.raw.len() {
            0 => 0,
            n @ 1..=INT_MAX_BYTE_LEN => match endian {
                Endian::Little => LittleEndian::read_uint(&self.raw, n),
                Endian::Big => BigEndian::read_uint(&self.raw, n),
            },
            n => return Err(DecodeError::FieldTooWide { len: n }),
        };
        // n <= 4, so the value always fits
        Ok(value as u32)
    }
}

impl Decode for FixedField {
    fn width(&self) -> usize {
        self.width
    }

    fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    fn decode(&mut self, buf: &[u8], offset: usize) -> Result<usize, DecodeError> {
        let out_of_bounds = DecodeError::OutOfBounds {
            offset,
            width: self.width,
            len: buf.len(),
        };
        let end = offset.checked_add(self.width).ok_or(out_of_bounds.clone())?;
        let slice = buf.get(offset..end).ok_or(out_of_bounds)?;

        self.raw.clear();
        self.raw.extend_from_slice(slice);
        Ok(end)
    }
}
