use super::{Decode, FixedField, Node};
use crate::DecodeError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Child {
    name: &'static str,
    node: Node,
}

/// An ordered run of child nodes decoded back to back.
///
/// The width is the sum of the children's widths, and after a successful decode
/// the stored bytes are the children's bytes concatenated in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeNode {
    children: Vec<Child>,
    raw: Vec<u8>,
}

impl CompositeNode {
    pub fn builder() -> CompositeBuilder {
        CompositeBuilder::default()
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.node)
    }

    pub fn field(&self, name: &str) -> Option<&FixedField> {
        self.child(name).and_then(Node::as_field)
    }

    pub fn composite(&self, name: &str) -> Option<&CompositeNode> {
        self.child(name).and_then(Node::as_composite)
    }

    /// Children in declaration order.
    pub fn children(&self) -> impl Iterator<Item = (&'static str, &Node)> {
        self.children.iter().map(|c| (c.name, &c.node))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Decode for CompositeNode {
    fn width(&self) -> usize {
        self.children.iter().map(|c| c.node.width()).sum()
    }

    fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    fn decode(&mut self, buf: &[u8], offset: usize) -> Result<usize, DecodeError> {
        if offset > buf.len() {
            return Err(DecodeError::InvalidOffset {
                offset,
                len: buf.len(),
            });
        }

        self.raw.clear();
        let mut cur = offset;
        for child in &mut self.children {
            let next = child.node.decode(buf, cur)?;
            log::debug!(
                "decoded {} at {:#x} ({} bytes)",
                child.name,
                cur,
                next - cur
            );
            self.raw.extend_from_slice(child.node.raw_bytes());
            cur = next;
        }
        Ok(cur)
    }
}

/// Declares the children of a [`CompositeNode`] in decode order.
#[derive(Debug, Default)]
pub struct CompositeBuilder {
    children: Vec<Child>,
}

impl CompositeBuilder {
    pub fn field(self, name: &'static str, width: usize) -> Self {
        self.push(name, FixedField::new(width).into())
    }

    pub fn composite(self, name: &'static str, node: CompositeNode) -> Self {
        self.push(name, node.into())
    }

    fn push(mut self, name: &'static str, node: Node) -> Self {
        debug_assert!(
            self.children.iter().all(|c| c.name != name),
            "duplicate child name {name}"
        );
        self.children.push(Child { name, node });
        self
    }

    pub fn build(self) -> CompositeNode {
        CompositeNode {
            children: self.children,
            raw: Vec::new(),
        }
    }
}
