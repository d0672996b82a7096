//! Video containers.

use crate::{contains, ftyp, offset, prefix, riff};

const EBML_HEADER: &[u8] = b"\x1A\x45\xDF\xA3";

/// Ogg whose first logical stream carries video. Tried only after
/// [`audio::ogg`](crate::audio::ogg) accepted the input.
pub fn ogg_video(raw: &[u8], _limit: u32) -> bool {
    [&b"\x80theora"[..], b"fishead\x00", b"\x01video\x00\x00\x00"]
        .iter()
        .any(|codec| offset(raw, codec, 28))
}

/// MPEG program/system stream: start code `00 00 01 Bx`.
pub fn mpeg(raw: &[u8], _limit: u32) -> bool {
    matches!(raw, [0x00, 0x00, 0x01, code, ..] if (0xB0..=0xBF).contains(code))
}

pub fn quicktime(raw: &[u8], _limit: u32) -> bool {
    ftyp(raw, &[b"qt  "])
}

pub fn mqv(raw: &[u8], _limit: u32) -> bool {
    ftyp(raw, &[b"mqt "])
}

pub fn mp4(raw: &[u8], _limit: u32) -> bool {
    ftyp(
        raw,
        &[
            b"avc1", b"dash", b"iso2", b"iso3", b"iso4", b"iso5", b"iso6", b"isom", b"mmp4",
            b"mp41", b"mp42", b"mp4v", b"mp71", b"NDSC", b"NDSH", b"NDSM", b"NDSP", b"NDSS",
            b"NDXC", b"NDXH", b"NDXM", b"NDXP", b"NDXS", b"F4V ", b"F4P ",
        ],
    )
}

fn ebml_doc_type(raw: &[u8], doc_type: &[u8]) -> bool {
    raw.starts_with(EBML_HEADER) && contains(&raw[EBML_HEADER.len()..], doc_type)
}

pub fn webm(raw: &[u8], _limit: u32) -> bool {
    ebml_doc_type(raw, b"webm")
}

pub fn mkv(raw: &[u8], _limit: u32) -> bool {
    ebml_doc_type(raw, b"matroska")
}

pub fn three_gp(raw: &[u8], _limit: u32) -> bool {
    ftyp(
        raw,
        &[
            b"3gp1", b"3gp2", b"3gp3", b"3gp4", b"3gp5", b"3gp6", b"3gp7", b"3gs7", b"3ge6",
            b"3ge7", b"3gg6",
        ],
    )
}

pub fn three_g2(raw: &[u8], _limit: u32) -> bool {
    ftyp(raw, &[b"3g24", b"3g25", b"3g26", b"3g2a", b"3g2b", b"3g2c"])
}

pub fn avi(raw: &[u8], _limit: u32) -> bool {
    riff(raw, b"AVI ")
}

pub fn flv(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"FLV\x01")
}

/// Advanced Systems Format (WMV/WMA container).
pub fn asf(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\x30\x26\xB2\x75\x8E\x66\xCF\x11\xA6\xD9\x00\xAA\x00\x62\xCE\x6C")
}

pub fn m4v(raw: &[u8], _limit: u32) -> bool {
    ftyp(raw, &[b"M4V ", b"M4VH", b"M4VP"])
}

/// RealMedia.
pub fn rmvb(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b".RMF"])
}
