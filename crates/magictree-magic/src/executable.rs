//! Native executables, bytecode, shortcuts and ROM images.

use crate::{be_u16, be_u32, prefix};

const ELF_REL: u16 = 1;
const ELF_EXEC: u16 = 2;
const ELF_DYN: u16 = 3;
const ELF_CORE: u16 = 4;

/// DOS/PE executable.
pub fn exe(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"MZ")
}

pub fn elf(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\x7FELF")
}

/// `e_type` from the ELF header, honouring `EI_DATA`.
fn elf_type(raw: &[u8]) -> Option<u16> {
    if !raw.starts_with(b"\x7FELF") {
        return None;
    }
    let bytes = [*raw.get(16)?, *raw.get(17)?];
    match raw.get(5)? {
        1 => Some(u16::from_le_bytes(bytes)),
        2 => Some(u16::from_be_bytes(bytes)),
        _ => None,
    }
}

pub fn elf_obj(raw: &[u8], _limit: u32) -> bool {
    elf_type(raw) == Some(ELF_REL)
}

pub fn elf_exe(raw: &[u8], _limit: u32) -> bool {
    elf_type(raw) == Some(ELF_EXEC)
}

pub fn elf_lib(raw: &[u8], _limit: u32) -> bool {
    elf_type(raw) == Some(ELF_DYN)
}

pub fn elf_dump(raw: &[u8], _limit: u32) -> bool {
    elf_type(raw) == Some(ELF_CORE)
}

/// Java class file. Shares `CA FE BA BE` with universal Mach-O binaries;
/// the class file major version (>= 45) tells them apart.
pub fn class(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\xCA\xFE\xBA\xBE") && be_u16(raw, 6).is_some_and(|major| major >= 45)
}

/// Mach-O, thin (either byte order, 32/64 bit) or universal.
pub fn macho(raw: &[u8], _limit: u32) -> bool {
    if prefix(
        raw,
        &[
            b"\xFE\xED\xFA\xCE",
            b"\xFE\xED\xFA\xCF",
            b"\xCE\xFA\xED\xFE",
            b"\xCF\xFA\xED\xFE",
        ],
    ) {
        return true;
    }
    raw.starts_with(b"\xCA\xFE\xBA\xBE") && be_u32(raw, 4).is_some_and(|arches| (1..20).contains(&arches))
}

pub fn wasm(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\x00asm")
}

/// Shockwave Flash, uncompressed, zlib or LZMA.
pub fn swf(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b"FWS", b"CWS", b"ZWS"])
}

/// Windows shell link.
pub fn lnk(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\x4C\x00\x00\x00\x01\x14\x02\x00")
}

/// iNES ROM image.
pub fn nes(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"NES\x1A")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elf_header(data: u8, e_type: u16) -> Vec<u8> {
        let mut raw = b"\x7FELF\x02".to_vec();
        raw.push(data);
        raw.resize(16, 0);
        if data == 1 {
            raw.extend_from_slice(&e_type.to_le_bytes());
        } else {
            raw.extend_from_slice(&e_type.to_be_bytes());
        }
        raw
    }

    #[test]
    fn elf_types_in_both_byte_orders() {
        assert!(elf_lib(&elf_header(1, ELF_DYN), 3072));
        assert!(elf_lib(&elf_header(2, ELF_DYN), 3072));
        assert!(elf_exe(&elf_header(1, ELF_EXEC), 3072));
        assert!(elf_obj(&elf_header(2, ELF_REL), 3072));
        assert!(elf_dump(&elf_header(1, ELF_CORE), 3072));
        assert!(!elf_exe(&elf_header(1, ELF_DYN), 3072));
    }

    #[test]
    fn elf_type_needs_full_header_prefix() {
        assert!(elf(b"\x7FELF", 4));
        assert!(!elf_exe(b"\x7FELF\x02\x01", 6));
        assert!(!elf_exe(&elf_header(3, ELF_EXEC), 3072));
    }

    #[test]
    fn class_and_universal_macho_disambiguate() {
        let class_file = b"\xCA\xFE\xBA\xBE\x00\x00\x00\x34";
        assert!(class(class_file, 3072));
        assert!(!macho(class_file, 3072));

        let fat = b"\xCA\xFE\xBA\xBE\x00\x00\x00\x02";
        assert!(macho(fat, 3072));
        assert!(!class(fat, 3072));
    }
}
