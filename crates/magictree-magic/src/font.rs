//! Font files.

use crate::offset;

pub fn ttf(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\x00\x01\x00\x00\x00")
}

pub fn otf(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"OTTO")
}

pub fn woff(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"wOFF")
}

pub fn woff2(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"wOF2")
}

/// Embedded OpenType: `LP` magic at 34 and a known header version at 8.
pub fn eot(raw: &[u8], _limit: u32) -> bool {
    offset(raw, b"LP", 34)
        && raw.get(8..12).is_some_and(|version| {
            matches!(
                version,
                b"\x00\x00\x01\x00" | b"\x01\x00\x02\x00" | b"\x02\x00\x02\x00"
            )
        })
}
