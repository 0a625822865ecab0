use elfhdr_core::header::ident::IdentityBlock;
use elfhdr_core::{align, Decode, DecodeError, ElfHeaderFile, Header, HeaderRecord};
use goblin::elf::header::{EM_386, EM_MIPS, ET_DYN, ET_EXEC};
use goblin::elf::Elf;

const IDENT: [u8; 16] = [
    0x7F, 0x45, 0x4C, 0x46, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

fn zero_filled() -> Vec<u8> {
    let mut buf = IDENT.to_vec();
    buf.resize(52, 0);
    buf
}

fn line<'a>(text: &'a str, label: &str) -> &'a str {
    text.lines()
        .find(|l| l.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("no {label} line in {text:?}"))
}

/// A plausible i386 shared object header in the given byte order.
fn sample_header(big_endian: bool) -> Vec<u8> {
    let mut buf = IDENT.to_vec();
    buf[5] = if big_endian { 2 } else { 1 };

    let half = |buf: &mut Vec<u8>, v: u16| {
        buf.extend_from_slice(&if big_endian { v.to_be_bytes() } else { v.to_le_bytes() })
    };
    half(&mut buf, ET_DYN);
    half(&mut buf, EM_386);

    let word = |buf: &mut Vec<u8>, v: u32| {
        buf.extend_from_slice(&if big_endian { v.to_be_bytes() } else { v.to_le_bytes() })
    };
    word(&mut buf, 1);
    word(&mut buf, 0x1090);
    word(&mut buf, 52);
    word(&mut buf, 0x3A48);
    word(&mut buf, 0);

    for v in [52u16, 32, 10, 40, 29, 28] {
        half(&mut buf, v);
    }
    buf
}

#[test]
fn zero_filled_header_renders_system_v() {
    let buf = zero_filled();
    let mut header = HeaderRecord::new();
    assert_eq!(header.decode(&buf, 0).unwrap(), 52);

    let text = header.render();
    assert_eq!(
        line(&text, "Magic:"),
        "  Magic:    7F 45 4C 46 01 01 01 00 00 00 00 00 00 00 00 00"
    );
    assert_eq!(line(&text, "Class:"), "  Class:    ELF32");
    assert_eq!(line(&text, "Data:"), "  Data:     little endian");
    assert_eq!(line(&text, "Version:"), "  Version:  1 (current)");
    assert_eq!(line(&text, "OS/ABI:"), "  OS/ABI:   System V");
    assert_eq!(text.lines().count(), 5);
}

#[test]
fn render_is_already_aligned() {
    let header = HeaderRecord::parse(&zero_filled()).unwrap();
    let text = header.render();
    assert_eq!(align(&text), text);

    let all = header.render_all();
    assert_eq!(align(&all), all);
}

#[test]
fn render_all_lists_scalar_fields() {
    let header = HeaderRecord::parse(&sample_header(false)).unwrap();
    let text = header.render_all();
    assert_eq!(text.lines().count(), 18);
    assert!(line(&text, "Type:").ends_with("DYN"));
    assert!(line(&text, "Machine:").ends_with("386"));
    assert!(line(&text, "Entry point address:").ends_with("0x1090"));
    assert!(line(&text, "Start of section headers:").ends_with("14920 (bytes into file)"));
    assert!(line(&text, "Section header string table index:").ends_with(" 28"));
    assert!(!text.contains('\t'));
}

#[test]
fn short_buffers_fail_out_of_bounds() {
    let full = zero_filled();
    for len in [0, 1, 15, 16, 17, 51] {
        let err = HeaderRecord::parse(&full[..len]).unwrap_err();
        assert!(
            matches!(err, DecodeError::OutOfBounds { len: l, .. } if l == len),
            "len {len}: {err:?}"
        );
    }
}

#[test]
fn decode_past_end_is_invalid_offset() {
    let mut header = HeaderRecord::new();
    let err = header.decode(&zero_filled(), 53).unwrap_err();
    assert_eq!(err, DecodeError::InvalidOffset { offset: 53, len: 52 });
}

#[test]
fn decode_at_nonzero_offset() {
    let mut buf = vec![0xAA; 8];
    buf.extend(sample_header(false));
    let mut header = HeaderRecord::new();
    assert_eq!(header.decode(&buf, 8).unwrap(), 60);
    assert_eq!(header.e_entry(), 0x1090);
}

#[test]
fn composite_bytes_are_children_concatenated() {
    let buf = sample_header(false);
    let header = HeaderRecord::parse(&buf).unwrap();
    let joined: Vec<u8> = header
        .as_node()
        .children()
        .flat_map(|(_, n)| n.raw_bytes().to_vec())
        .collect();
    assert_eq!(joined, buf);
    assert_eq!(header.raw_bytes(), buf.as_slice());
    assert_eq!(header.identity().as_node().raw_bytes(), &buf[..16]);
}

#[test]
fn scalars_match_goblin() {
    for big_endian in [false, true] {
        let buf = sample_header(big_endian);
        let ours = HeaderRecord::parse(&buf).unwrap();
        let theirs = Elf::parse_header(&buf).unwrap();

        assert_eq!(ours.e_type(), theirs.e_type);
        assert_eq!(ours.e_machine(), theirs.e_machine);
        assert_eq!(ours.e_version(), theirs.e_version);
        assert_eq!(u64::from(ours.e_entry()), theirs.e_entry);
        assert_eq!(u64::from(ours.e_phoff()), theirs.e_phoff);
        assert_eq!(u64::from(ours.e_shoff()), theirs.e_shoff);
        assert_eq!(ours.e_flags(), theirs.e_flags);
        assert_eq!(ours.e_ehsize(), theirs.e_ehsize);
        assert_eq!(ours.e_phentsize(), theirs.e_phentsize);
        assert_eq!(ours.e_phnum(), theirs.e_phnum);
        assert_eq!(ours.e_shentsize(), theirs.e_shentsize);
        assert_eq!(ours.e_shnum(), theirs.e_shnum);
        assert_eq!(ours.e_shstrndx(), theirs.e_shstrndx);
    }
}

#[test]
fn header_trait_object() {
    let mut buf = sample_header(true);
    buf[16..18].copy_from_slice(&ET_EXEC.to_be_bytes());
    buf[18..20].copy_from_slice(&EM_MIPS.to_be_bytes());

    let header: Box<dyn Header> = Box::new(HeaderRecord::parse(&buf).unwrap());
    assert!(header.is_executable());
    assert!(!header.is_64());
    assert_eq!(header.machine(), EM_MIPS);
    assert_eq!(header.entry_point(), 0x1090);
}

#[test]
fn standalone_identity_block() {
    let mut ident = IdentityBlock::new();
    assert_eq!(ident.decode(&IDENT, 0).unwrap(), 16);
    assert_eq!(ident.raw_bytes(), &IDENT);
    assert_eq!(ident.os_abi_name(), "System V");
}

#[test]
fn concurrent_decodes_of_shared_buffer() {
    let buf = sample_header(false);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| HeaderRecord::parse(&buf).map(|h| h.e_shoff())))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), Ok(0x3A48));
        }
    });
}

#[test]
fn open_reads_header_from_disk() {
    let path = std::env::temp_dir().join(format!("elfhdr-open-{}.bin", std::process::id()));
    let mut contents = sample_header(false);
    contents.extend_from_slice(&[0xCC; 64]);
    std::fs::write(&path, &contents).unwrap();

    let file = ElfHeaderFile::open(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(file.get_entry_offset(), 0x1090);
    assert_eq!(file.header.raw_bytes().len(), 52);
    assert_eq!(file.path, path.display().to_string());
}

#[test]
fn open_truncated_file_fails() {
    let path = std::env::temp_dir().join(format!("elfhdr-short-{}.bin", std::process::id()));
    std::fs::write(&path, &IDENT).unwrap();

    let err = ElfHeaderFile::open(&path).err().unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(
        err.downcast_ref::<DecodeError>(),
        Some(DecodeError::OutOfBounds { .. })
    ));
}

#[test]
fn open_missing_file_fails() {
    assert!(ElfHeaderFile::open("/definitely/not/here.elf").is_err());
}
