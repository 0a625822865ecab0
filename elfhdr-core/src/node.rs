pub mod composite;
pub mod field;

pub use composite::{CompositeBuilder, CompositeNode};
pub use field::{bytes_to_uint, Endian, FixedField, INT_MAX_BYTE_LEN};

use crate::DecodeError;

/// A unit of the decoding tree.
///
/// Every node consumes the buffer sequentially from the offset it is handed and
/// reports the first offset it did not consume.
pub trait Decode {
    /// Number of bytes this node consumes.
    fn width(&self) -> usize;

    /// Bytes captured by the last successful `decode`, empty before.
    fn raw_bytes(&self) -> &[u8];

    /// Decodes from `buf` starting at `offset`, returning the next unconsumed offset.
    fn decode(&mut self, buf: &[u8], offset: usize) -> Result<usize, DecodeError>;
}

/// The two shapes a tree node can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Field(FixedField),
    Composite(CompositeNode),
}

impl Node {
    pub fn as_field(&self) -> Option<&FixedField> {
        match self {
            Node::Field(f) => Some(f),
            Node::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeNode> {
        match self {
            Node::Composite(c) => Some(c),
            Node::Field(_) => None,
        }
    }
}

impl Decode for Node {
    fn width(&self) -> usize {
        match self {
            Node::Field(f) => f.width(),
            Node::Composite(c) => c.width(),
        }
    }

    fn raw_bytes(&self) -> &[u8] {
        match self {
            Node::Field(f) => f.raw_bytes(),
            Node::Composite(c) => c.raw_bytes(),
        }
    }

    fn decode(&mut self, buf: &[u8], offset: usize) -> Result<usize, DecodeError> {
        match self {
            Node::Field(f) => f.decode(buf, offset),
            Node::Composite(c) => c.decode(buf, offset),
        }
    }
}

impl From<FixedField> for Node {
    fn from(field: FixedField) -> Self {
        Node::Field(field)
    }
}

impl From<CompositeNode> for Node {
    fn from(node: CompositeNode) -> Self {
        Node::Composite(node)
    }
}
