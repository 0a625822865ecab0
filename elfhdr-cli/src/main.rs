use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use elfhdr_core::{ElfHeaderFile, HeaderRecord};
use serde::Serialize;

/// Print the header of an ELF32 binary
#[derive(Parser)]
#[command(
    name = "elfhdr",
    about = "Decode and print the ELF32 file header",
    version,
    author
)]
struct Cli {
    /// Path to binary file
    #[arg(required = true)]
    path: std::path::PathBuf,

    /// Also print the scalar header fields (type, machine, offsets, counts)
    #[arg(short, long)]
    all: bool,

    /// Emit JSON instead of aligned text
    #[arg(long)]
    json: bool,

    /// Fail if the file does not start with the ELF magic number
    #[arg(long)]
    strict: bool,
}

#[derive(Serialize)]
struct HeaderSummary {
    magic: String,
    class: &'static str,
    data: &'static str,
    version: String,
    os_abi: &'static str,
    abi_version: u8,
    e_type: u16,
    e_machine: u16,
    e_version: u32,
    e_entry: u32,
    e_phoff: u32,
    e_shoff: u32,
    e_flags: u32,
    e_ehsize: u16,
    e_phentsize: u16,
    e_phnum: u16,
    e_shentsize: u16,
    e_shnum: u16,
    e_shstrndx: u16,
}

impl From<&HeaderRecord> for HeaderSummary {
    fn from(h: &HeaderRecord) -> Self {
        let ident = h.identity();
        Self {
            magic: ident.hex(),
            class: ident.class_name(),
            data: ident.endian_name(),
            version: ident.version_label(),
            os_abi: ident.os_abi_name(),
            abi_version: ident.abi_version(),
            e_type: h.e_type(),
            e_machine: h.e_machine(),
            e_version: h.e_version(),
            e_entry: h.e_entry(),
            e_phoff: h.e_phoff(),
            e_shoff: h.e_shoff(),
            e_flags: h.e_flags(),
            e_ehsize: h.e_ehsize(),
            e_phentsize: h.e_phentsize(),
            e_phnum: h.e_phnum(),
            e_shentsize: h.e_shentsize(),
            e_shnum: h.e_shnum(),
            e_shstrndx: h.e_shstrndx(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let file = ElfHeaderFile::open(&cli.path)?;
    if cli.strict {
        file.header.validate_magic()?;
    }

    if cli.json {
        let summary = HeaderSummary::from(&file.header);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "ELF Header:".bold());
    if cli.all {
        print!("{}", file.header.render_all());
    } else {
        print!("{}", file.header.render());
    }

    Ok(())
}
