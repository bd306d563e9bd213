//! Turns an assembled word stream into either a text hex listing or an
//! ELF32 relocatable object, per `SPEC_FULL.md` §4.6/§6.
//!
//! In text mode the file named on `-o` receives the hex listing; a
//! dot-prefixed sidecar next to it receives a one-line Verilog `` `define ``
//! directive naming that same sidecar path (§6).

/// One 32-bit word per source instruction, in source order.
pub struct AssembledWords(pub Vec<u32>);

/// Renders the hex listing: one 8-hex-digit zero-padded word per line.
pub fn hex_listing(words: &[u32]) -> String {
    let mut out = String::new();
    for word in words {
        out.push_str(&format!("{word:08x}\n"));
    }
    out
}

/// Renders the Verilog-style `` `define `` directive that names the sidecar
/// holding the actual hex listing.
pub fn verilog_directive(sidecar_path: &str) -> String {
    format!("`define filename \"{sidecar_path}\"\n")
}

/// Given the `-o` output path, the dot-prefixed sidecar path that receives
/// the Verilog `` `define `` directive (§6).
pub fn sidecar_path(output_path: &str) -> String {
    match output_path.rsplit_once('/') {
        Some((dir, name)) => format!("{dir}/.{name}"),
        None => format!(".{output_path}"),
    }
}

const SHSTRTAB: &[u8] = b"\0.text\0.data\0.bss\0.symtab\0.strtab\0.shstrtab\0";

// Hardcoded verbatim from the reference implementation; `.bss`'s offset in
// particular does not point at the start of the `.bss` label in
// `SHSTRTAB` above. Preserved rather than corrected (§4.6).
const SH_NAME_NULL: u32 = 1;
const SH_NAME_TEXT: u32 = 7;
const SH_NAME_DATA: u32 = 13;
const SH_NAME_BSS: u32 = 17;
const SH_NAME_SHSTRTAB: u32 = 34;

const EHDR_SIZE: u32 = 52;
const SHDR_SIZE: u32 = 40;
const SHNUM: u32 = 5;
const SHSTRNDX: u32 = 4;

const SHT_NULL: u32 = 0;
const SHT_PROGBITS: u32 = 1;
const SHT_STRTAB: u32 = 3;
const SHT_NOBITS: u32 = 8;

const SHF_WRITE: u32 = 1;
const SHF_ALLOC: u32 = 2;
const SHF_EXECINSTR: u32 = 4;

/// Builds a complete ELF32 little-endian relocatable object for `EM_ARM`
/// containing the words as the `.text` section's bytes, bit-exact per
/// `SPEC_FULL.md` §4.6.
pub fn build_elf(words: &[u32]) -> Vec<u8> {
    let text_bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    let text_offset = EHDR_SIZE;
    let shstrtab_offset = text_offset + text_bytes.len() as u32;
    let shoff = shstrtab_offset + SHSTRTAB.len() as u32;

    let mut out = Vec::with_capacity((shoff + SHNUM * SHDR_SIZE) as usize);

    // e_ident
    out.extend_from_slice(&[0x7F, b'E', b'L', b'F', 1, 1, 1, 0]);
    out.extend_from_slice(&[0u8; 8]);
    push_u16(&mut out, 1); // e_type = ET_REL
    push_u16(&mut out, 0x28); // e_machine = EM_ARM
    push_u32(&mut out, 1); // e_version
    push_u32(&mut out, 0); // e_entry
    push_u32(&mut out, 0); // e_phoff
    push_u32(&mut out, shoff); // e_shoff
    push_u32(&mut out, 0x0500_0000); // e_flags
    push_u16(&mut out, EHDR_SIZE as u16); // e_ehsize
    push_u16(&mut out, 0); // e_phentsize
    push_u16(&mut out, 0); // e_phnum
    push_u16(&mut out, SHDR_SIZE as u16); // e_shentsize
    push_u16(&mut out, SHNUM as u16); // e_shnum
    push_u16(&mut out, SHSTRNDX as u16); // e_shstrndx
    debug_assert_eq!(out.len() as u32, EHDR_SIZE);

    out.extend_from_slice(&text_bytes);
    out.extend_from_slice(SHSTRTAB);
    debug_assert_eq!(out.len() as u32, shoff);

    push_section_header(&mut out, SH_NAME_NULL, SHT_NULL, 0, 0, 0, 0);
    push_section_header(
        &mut out,
        SH_NAME_TEXT,
        SHT_PROGBITS,
        SHF_ALLOC | SHF_EXECINSTR,
        text_offset,
        text_bytes.len() as u32,
        4,
    );
    push_section_header(&mut out, SH_NAME_DATA, SHT_PROGBITS, SHF_ALLOC | SHF_WRITE, shstrtab_offset, 0, 1);
    push_section_header(&mut out, SH_NAME_BSS, SHT_NOBITS, SHF_ALLOC | SHF_WRITE, shstrtab_offset, 0, 1);
    push_section_header(
        &mut out,
        SH_NAME_SHSTRTAB,
        SHT_STRTAB,
        0,
        shstrtab_offset,
        SHSTRTAB.len() as u32,
        1,
    );

    out
}

#[allow(clippy::too_many_arguments)]
fn push_section_header(out: &mut Vec<u8>, name: u32, ty: u32, flags: u32, offset: u32, size: u32, align: u32) {
    push_u32(out, name);
    push_u32(out, ty);
    push_u32(out, flags);
    push_u32(out, 0); // sh_addr
    push_u32(out, offset);
    push_u32(out, size);
    push_u32(out, 0); // sh_link
    push_u32(out, 0); // sh_info
    push_u32(out, align);
    push_u32(out, 0); // sh_entsize
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}
