//! Compressed streams and archive containers.

use crate::{offset, prefix};

const ZIP_LOCAL_HEADER: &[u8] = b"PK\x03\x04";

pub fn seven_z(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"7z\xBC\xAF\x27\x1C")
}

/// ZIP: local file header, empty archive, or spanned archive marker.
pub fn zip(raw: &[u8], _limit: u32) -> bool {
    matches!(
        raw,
        [b'P', b'K', 3, 4, ..] | [b'P', b'K', 5, 6, ..] | [b'P', b'K', 7, 8, ..]
    )
}

pub fn gzip(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\x1F\x8B")
}

pub fn bz2(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"BZh")
}

pub fn xz(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\xFD7zXZ\x00")
}

/// Zstandard frame (current magic `28 B5 2F FD`, or a legacy v0.2-v0.7 frame).
pub fn zstd(raw: &[u8], _limit: u32) -> bool {
    match raw {
        [first, 0xB5, 0x2F, 0xFD, ..] => (0x22..=0x28).contains(first),
        _ => false,
    }
}

pub fn lzip(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"LZIP")
}

pub fn rar(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b"Rar!\x1A\x07\x00", b"Rar!\x1A\x07\x01\x00"])
}

pub fn cab(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"MSCF\x00\x00\x00\x00")
}

pub fn xar(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"xar!")
}

pub fn rpm(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\xED\xAB\xEE\xDB")
}

/// cpio in portable ASCII, new ASCII, CRC, or binary (either byte order) form.
pub fn cpio(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b"070707", b"070701", b"070702", b"\xC7\x71", b"\x71\xC7"])
}

/// Unix `ar` archive.
pub fn ar(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"!<arch>\n")
}

/// Debian package: an `ar` archive whose first member is `debian-binary`.
pub fn deb(raw: &[u8], limit: u32) -> bool {
    ar(raw, limit) && offset(raw, b"debian-binary", 8)
}

pub fn crx(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"Cr24")
}

pub fn torrent(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"d8:announce")
}

/// tar: POSIX `ustar` magic, or a pre-POSIX header with a valid checksum.
pub fn tar(raw: &[u8], _limit: u32) -> bool {
    let Some(header) = raw.get(..512) else {
        return false;
    };
    if offset(header, b"ustar", 257) {
        return true;
    }

    let Some(recorded) = parse_octal(&header[148..156]) else {
        return false;
    };
    let computed: u64 = header
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            if (148..156).contains(&i) {
                u64::from(b' ')
            } else {
                u64::from(b)
            }
        })
        .sum();
    recorded == computed
}

fn parse_octal(field: &[u8]) -> Option<u64> {
    let digits = field
        .iter()
        .copied()
        .skip_while(|&b| b == b' ')
        .take_while(|&b| b != 0 && b != b' ');
    let mut value: u64 = 0;
    let mut seen = false;
    for b in digits {
        if !(b'0'..=b'7').contains(&b) {
            return None;
        }
        value = value.checked_mul(8)?.checked_add(u64::from(b - b'0'))?;
        seen = true;
    }
    seen.then_some(value)
}

// ============================================================================
// ZIP entry inspection (shared with the document module)
// ============================================================================

/// Iterate the file names of the local headers found in `raw`.
///
/// Stops at the first header whose name runs past the end of `raw`.
pub(crate) fn zip_entry_names(raw: &[u8]) -> ZipEntryNames<'_> {
    ZipEntryNames { raw, pos: 0 }
}

pub(crate) struct ZipEntryNames<'a> {
    raw: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for ZipEntryNames<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let rest = self.raw.get(self.pos..)?;
        let start = self.pos + crate::index_of(rest, ZIP_LOCAL_HEADER)?;
        self.pos = start + ZIP_LOCAL_HEADER.len();

        let name_len = usize::from(crate::le_u16(self.raw, start + 26)?);
        let name_start = start + 30;
        let name = self.raw.get(name_start..name_start + name_len)?;
        self.pos = name_start + name_len;
        Some(name)
    }
}
