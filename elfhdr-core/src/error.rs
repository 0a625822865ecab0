use thiserror::Error;

/// Structural failures raised while walking a decoding tree.
///
/// Any of these aborts the decode of the whole tree; there is no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("field of {width} bytes at offset {offset} exceeds buffer of {len} bytes")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },

    #[error("offset {offset} is past the end of a {len} byte buffer")]
    InvalidOffset { offset: usize, len: usize },

    #[error("cannot convert {len} bytes to an integer (max {max})", max = crate::node::INT_MAX_BYTE_LEN)]
    FieldTooWide { len: usize },

    #[error("bad ELF magic: {0:02X?}")]
    BadMagic([u8; 4]),
}
