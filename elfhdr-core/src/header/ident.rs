use std::borrow::Borrow;

use goblin::elf::header::{ELFCLASS32, ELFMAG, EV_CURRENT, SELFMAG};

use crate::node::{CompositeNode, Decode, Endian};
use crate::DecodeError;

pub const EI_PAD_LEN: usize = 7;

pub const MAGIC: &str = "magic";
pub const CLASS: &str = "class";
pub const DATA: &str = "data";
pub const VERSION: &str = "version";
pub const OSABI: &str = "osabi";
pub const ABIVERSION: &str = "abiversion";
pub const PAD: &str = "pad";

/// Names of the known OS/ABI codes. Anything else renders as "Unknown".
pub const OS_ABI_NAMES: [(u8, &str); 17] = [
    (0x00, "System V"),
    (0x01, "HP-UX"),
    (0x02, "NetBSD"),
    (0x03, "Linux"),
    (0x04, "GNU Hurd"),
    (0x06, "Solaris"),
    (0x07, "AIX"),
    (0x08, "RIX"),
    (0x09, "FreeBSD"),
    (0x0A, "Tru64"),
    (0x0B, "Novell Modesto"),
    (0x0C, "OpenBSD"),
    (0x0D, "OPenVMS"),
    (0x0E, "NonStop Kernel"),
    (0x0F, "AROS"),
    (0x11, "Fenix OS"),
    (0x53, "Sortix"),
];

pub fn os_abi_name(osabi: u8) -> &'static str {
    OS_ABI_NAMES
        .iter()
        .find(|(code, _)| *code == osabi)
        .map_or("Unknown", |(_, name)| name)
}

/// The `e_ident` block: magic, class, data, version, OS/ABI, ABI version, padding.
///
/// `N` is either an owned [`CompositeNode`] (a standalone block that can be
/// decoded) or a borrow of one nested inside a larger header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityBlock<N = CompositeNode> {
    node: N,
}

impl IdentityBlock {
    pub const WIDTH: usize = 16;

    pub fn new() -> Self {
        let node = CompositeNode::builder()
            .field(MAGIC, SELFMAG)
            .field(CLASS, 1)
            .field(DATA, 1)
            .field(VERSION, 1)
            .field(OSABI, 1)
            .field(ABIVERSION, 1)
            .field(PAD, EI_PAD_LEN)
            .build();
        Self { node }
    }

    pub fn into_node(self) -> CompositeNode {
        self.node
    }
}

impl Default for IdentityBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl Decode for IdentityBlock {
    fn width(&self) -> usize {
        self.node.width()
    }

    fn raw_bytes(&self) -> &[u8] {
        self.node.raw_bytes()
    }

    fn decode(&mut self, buf: &[u8], offset: usize) -> Result<usize, DecodeError> {
        self.node.decode(buf, offset)
    }
}

impl<'a> IdentityBlock<&'a CompositeNode> {
    pub(crate) fn view(node: &'a CompositeNode) -> Self {
        Self { node }
    }
}

impl<N: Borrow<CompositeNode>> IdentityBlock<N> {
    pub fn as_node(&self) -> &CompositeNode {
        self.node.borrow()
    }

    /// Value of a single-byte field, or 0 while the block is undecoded.
    ///
    /// An undecoded block therefore reads as class "ELF64", data "big endian"
    /// and OS/ABI "System V"; check [`is_decoded`](Self::is_decoded) first when
    /// that matters.
    fn byte(&self, name: &str) -> u8 {
        self.as_node()
            .field(name)
            .and_then(|f| f.to_uint().ok())
            .map_or(0, |v| v as u8)
    }

    /// True once the block holds all sixteen identity bytes.
    pub fn is_decoded(&self) -> bool {
        self.as_node().raw_bytes().len() == IdentityBlock::<CompositeNode>::WIDTH
    }

    pub fn magic(&self) -> &[u8] {
        self.as_node()
            .field(MAGIC)
            .map_or(&[][..], |f| f.raw_bytes())
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic() == &ELFMAG[..]
    }

    pub fn validate_magic(&self) -> Result<(), DecodeError> {
        if self.has_valid_magic() {
            return Ok(());
        }
        let mut magic = [0u8; SELFMAG];
        let got = self.magic();
        magic[..got.len()].copy_from_slice(got);
        Err(DecodeError::BadMagic(magic))
    }

    pub fn class(&self) -> u8 {
        self.byte(CLASS)
    }

    pub fn data(&self) -> u8 {
        self.byte(DATA)
    }

    pub fn version(&self) -> u8 {
        self.byte(VERSION)
    }

    pub fn osabi(&self) -> u8 {
        self.byte(OSABI)
    }

    pub fn abi_version(&self) -> u8 {
        self.byte(ABIVERSION)
    }

    pub fn endian(&self) -> Endian {
        Endian::from_data_byte(self.data())
    }

    pub fn is_32(&self) -> bool {
        self.class() == ELFCLASS32
    }

    pub fn class_name(&self) -> &'static str {
        if self.is_32() {
            "ELF32"
        } else {
            "ELF64"
        }
    }

    pub fn endian_name(&self) -> &'static str {
        match self.endian() {
            Endian::Little => "little endian",
            Endian::Big => "big endian",
        }
    }

    pub fn version_label(&self) -> String {
        match self.version() {
            v if v == EV_CURRENT => format!("{v} (current)"),
            v => format!("{v} (modified version)"),
        }
    }

    pub fn os_abi_name(&self) -> &'static str {
        os_abi_name(self.osabi())
    }

    /// Space separated uppercase hex of the whole block.
    pub fn hex(&self) -> String {
        self.as_node()
            .raw_bytes()
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Tab-delimited label/value lines, ready for [`crate::render::align`].
    pub fn describe(&self) -> String {
        format!(
            "  Magic:\t{}\n  Class:\t{}\n  Data:\t{}\n  Version:\t{}\n  OS/ABI:\t{}\n",
            self.hex(),
            self.class_name(),
            self.endian_name(),
            self.version_label(),
            self.os_abi_name(),
        )
    }
}
