use std::fmt;

use goblin::elf::header::{et_to_str, machine_to_str, ET_EXEC};

use crate::header::ident::IdentityBlock;
use crate::header::Header;
use crate::node::{CompositeNode, Decode};
use crate::render::align;
use crate::DecodeError;

pub const E_IDENT: &str = "e_ident";

/// Scalar fields following `e_ident`, in file order, with their widths.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
pub const SCALAR_FIELDS: [(&str, usize); 13] = [
    // Object file type (ET_*)
    ("e_type", 2),
    // Target architecture (EM_*)
    ("e_machine", 2),
    ("e_version", 4),
    ("e_entry", 4),
    ("e_phoff", 4),
    ("e_shoff", 4),
    ("e_flags", 4),
    ("e_ehsize", 2),
    ("e_phentsize", 2),
    ("e_phnum", 2),
    ("e_shentsize", 2),
    ("e_shnum", 2),
    ("e_shstrndx", 2),
];

/// The 52-byte `Elf32_Ehdr`: the identity block followed by thirteen scalar fields.
///
/// Scalar values are read in the byte order declared by the identity block's
/// data byte. The stored bytes are never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    node: CompositeNode,
}

impl HeaderRecord {
    pub const WIDTH: usize = 52;

    pub fn new() -> Self {
        let node = SCALAR_FIELDS.iter().fold(
            CompositeNode::builder().composite(E_IDENT, IdentityBlock::new().into_node()),
            |b, &(name, width)| b.field(name, width),
        );
        let node = node.build();
        debug_assert!(
            node.children().next().map(|(name, _)| name) == Some(E_IDENT)
                && node.composite(E_IDENT).is_some(),
            "{E_IDENT} must be the leading composite child"
        );
        Self { node }
    }

    /// Builds a header and decodes it from the start of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut header = Self::new();
        header.decode(buf, 0)?;
        Ok(header)
    }

    pub fn as_node(&self) -> &CompositeNode {
        &self.node
    }

    pub fn identity(&self) -> IdentityBlock<&CompositeNode> {
        match self.node.composite(E_IDENT) {
            Some(node) => IdentityBlock::view(node),
            None => unreachable!("header layout always starts with {E_IDENT}"),
        }
    }

    pub fn validate_magic(&self) -> Result<(), DecodeError> {
        self.identity().validate_magic()
    }

    /// Value of a scalar field in the declared byte order, 0 if unknown or undecoded.
    pub fn scalar(&self, name: &str) -> u32 {
        let endian = self.identity().endian();
        self.node
            .field(name)
            .and_then(|f| f.read_uint(endian).ok())
            .unwrap_or(0)
    }

    pub fn e_type(&self) -> u16 {
        self.scalar("e_type") as u16
    }

    pub fn e_machine(&self) -> u16 {
        self.scalar("e_machine") as u16
    }

    pub fn e_version(&self) -> u32 {
        self.scalar("e_version")
    }

    pub fn e_entry(&self) -> u32 {
        self.scalar("e_entry")
    }

    pub fn e_phoff(&self) -> u32 {
        self.scalar("e_phoff")
    }

    pub fn e_shoff(&self) -> u32 {
        self.scalar("e_shoff")
    }

    pub fn e_flags(&self) -> u32 {
        self.scalar("e_flags")
    }

    pub fn e_ehsize(&self) -> u16 {
        self.scalar("e_ehsize") as u16
    }

    pub fn e_phentsize(&self) -> u16 {
        self.scalar("e_phentsize") as u16
    }

    pub fn e_phnum(&self) -> u16 {
        self.scalar("e_phnum") as u16
    }

    pub fn e_shentsize(&self) -> u16 {
        self.scalar("e_shentsize") as u16
    }

    pub fn e_shnum(&self) -> u16 {
        self.scalar("e_shnum") as u16
    }

    pub fn e_shstrndx(&self) -> u16 {
        self.scalar("e_shstrndx") as u16
    }

    /// The identity block's five descriptive lines, label-aligned.
    pub fn render(&self) -> String {
        align(&self.identity().describe())
    }

    /// Like [`render`](Self::render), followed by one line per scalar field.
    pub fn render_all(&self) -> String {
        let mut text = self.identity().describe();
        text.push_str(&format!(
            "  Type:\t{}\n\
             \x20 Machine:\t{}\n\
             \x20 Version:\t{:#x}\n\
             \x20 Entry point address:\t{:#x}\n\
             \x20 Start of program headers:\t{} (bytes into file)\n\
             \x20 Start of section headers:\t{} (bytes into file)\n\
             \x20 Flags:\t{:#x}\n\
             \x20 Size of this header:\t{} (bytes)\n\
             \x20 Size of program headers:\t{} (bytes)\n\
             \x20 Number of program headers:\t{}\n\
             \x20 Size of section headers:\t{} (bytes)\n\
             \x20 Number of section headers:\t{}\n\
             \x20 Section header string table index:\t{}\n",
            et_to_str(self.e_type()),
            machine_to_str(self.e_machine()),
            self.e_version(),
            self.e_entry(),
            self.e_phoff(),
            self.e_shoff(),
            self.e_flags(),
            self.e_ehsize(),
            self.e_phentsize(),
            self.e_phnum(),
            self.e_shentsize(),
            self.e_shnum(),
            self.e_shstrndx(),
        ));
        align(&text)
    }
}

impl Default for HeaderRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl Decode for HeaderRecord {
    fn width(&self) -> usize {
        self.node.width()
    }

    fn raw_bytes(&self) -> &[u8] {
        self.node.raw_bytes()
    }

    fn decode(&mut self, buf: &[u8], offset: usize) -> Result<usize, DecodeError> {
        let next = self.node.decode(buf, offset)?;

        let ident = self.identity();
        if !ident.has_valid_magic() {
            log::warn!("bad ELF magic: {}", ident.hex());
        }
        if !ident.is_32() {
            log::warn!("class byte {} is not ELFCLASS32", ident.class());
        }
        Ok(next)
    }
}

impl Header for HeaderRecord {
    fn entry_point(&self) -> u64 {
        u64::from(self.e_entry())
    }

    fn machine(&self) -> u16 {
        self.e_machine()
    }

    fn is_64(&self) -> bool {
        !self.identity().is_32()
    }

    fn format_name(&self) -> &'static str {
        "ELF"
    }

    fn is_executable(&self) -> bool {
        self.e_type() == ET_EXEC
    }
}

impl fmt::Display for HeaderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
