//! Databases, geometry, time zone data and other structured binaries.

use crate::{be_u32, le_u16, le_u32, offset};

/// ESRI shape file code, big endian, shared by `.shp` and `.shx`.
const SHAPE_FILE_CODE: &[u8] = b"\x00\x00\x27\x0A";
const SHAPE_VERSION: u32 = 1000;
const SHAPE_HEADER_LEN: usize = 100;

pub fn sqlite(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"SQLite format 3\x00")
}

/// Microsoft Access 97-2003.
pub fn mdb(raw: &[u8], _limit: u32) -> bool {
    offset(raw, b"Standard Jet DB", 4)
}

/// Microsoft Access 2007+.
pub fn accdb(raw: &[u8], _limit: u32) -> bool {
    offset(raw, b"Standard ACE DB", 4)
}

/// dBase table: known version byte, plausible last-update date and header length.
pub fn dbf(raw: &[u8], _limit: u32) -> bool {
    let Some(&[version, _year, month, day]) = raw.get(..4) else {
        return false;
    };
    let known_version = matches!(
        version,
        0x02 | 0x03 | 0x04 | 0x05 | 0x30 | 0x31 | 0x32 | 0x43 | 0x63 | 0x83 | 0x8B | 0xCB | 0xF5 | 0xFB
    );
    known_version
        && (1..=12).contains(&month)
        && (1..=31).contains(&day)
        && le_u16(raw, 8).is_some_and(|header_len| header_len >= 33)
        && raw.get(28).is_some_and(|&flags| flags <= 1)
}

fn shape_header(raw: &[u8]) -> bool {
    raw.starts_with(SHAPE_FILE_CODE) && le_u32(raw, 28) == Some(SHAPE_VERSION)
}

/// ESRI shape index.
pub fn shx(raw: &[u8], _limit: u32) -> bool {
    shape_header(raw)
}

/// ESRI shape file: the first record after the header is record number 1.
/// Index files store an offset (50 words) there instead.
pub fn shp(raw: &[u8], _limit: u32) -> bool {
    shape_header(raw) && be_u32(raw, SHAPE_HEADER_LEN) == Some(1)
}

/// Binary glTF, version 1 or 2.
pub fn glb(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"glTF") && le_u32(raw, 4).is_some_and(|version| version == 1 || version == 2)
}

/// Time zone information file.
pub fn tzif(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"TZif")
}
