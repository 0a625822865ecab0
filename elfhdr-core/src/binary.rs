use crate::header::elf::HeaderRecord;
use crate::header::Header;
use anyhow::{Context, Result};
use std::io::Read;

/// An ELF32 header read from disk.
pub struct ElfHeaderFile {
    pub path: String,
    pub header: HeaderRecord,
}

impl ElfHeaderFile {
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let display = path.as_ref().display().to_string();
        let file = std::fs::File::open(&path).with_context(|| format!("opening {display}"))?;

        let mut buf = Vec::with_capacity(HeaderRecord::WIDTH);
        file.take(HeaderRecord::WIDTH as u64)
            .read_to_end(&mut buf)
            .with_context(|| format!("reading {display}"))?;
        log::info!("Read {} header bytes from {}", buf.len(), display);

        let header = HeaderRecord::parse(&buf)
            .with_context(|| format!("decoding ELF header of {display}"))?;

        if header.identity().version() != 1 {
            log::warn!(
                "Identity version is {}",
                header.identity().version_label()
            );
        }

        Ok(Self {
            path: display,
            header,
        })
    }

    pub fn get_entry_offset(&self) -> u64 {
        self.header.entry_point()
    }
}
