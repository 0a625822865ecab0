pub mod binary;
mod error;
pub mod header;
pub mod node;
pub mod render;

pub use binary::*;
pub use error::DecodeError;
pub use header::elf::HeaderRecord;
pub use header::ident::IdentityBlock;
pub use header::Header;
pub use node::{CompositeNode, Decode, FixedField, Node};
pub use render::align;
