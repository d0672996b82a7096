//! Raster and vector image formats, plus scientific and medical imaging.

use crate::{ftyp, le_u32, offset, prefix, riff};

const JPEG2000_SIGNATURE: &[u8] = b"\x00\x00\x00\x0C\x6A\x50\x20\x20\x0D\x0A\x87\x0A";

pub fn png(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\x89PNG\r\n\x1A\n")
}

pub fn jpg(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"\xFF\xD8\xFF")
}

/// JPEG XL, either a bare codestream or an ISOBMFF container.
pub fn jxl(raw: &[u8], _limit: u32) -> bool {
    prefix(
        raw,
        &[b"\xFF\x0A", b"\x00\x00\x00\x0C\x4A\x58\x4C\x20\x0D\x0A\x87\x0A"],
    )
}

fn jpeg2000(raw: &[u8], brand: &[u8]) -> bool {
    raw.starts_with(JPEG2000_SIGNATURE) && offset(raw, brand, 20)
}

pub fn jp2(raw: &[u8], _limit: u32) -> bool {
    jpeg2000(raw, b"jp2 ")
}

pub fn jpx(raw: &[u8], _limit: u32) -> bool {
    jpeg2000(raw, b"jpx ")
}

pub fn jpm(raw: &[u8], _limit: u32) -> bool {
    jpeg2000(raw, b"jpm ")
}

pub fn gif(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b"GIF87a", b"GIF89a"])
}

pub fn webp(raw: &[u8], _limit: u32) -> bool {
    riff(raw, b"WEBP")
}

pub fn tiff(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b"II*\x00", b"MM\x00*"])
}

/// BMP: `BM` followed by a DIB header of a known size.
pub fn bmp(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"BM")
        && le_u32(raw, 14).is_some_and(|dib| matches!(dib, 12 | 40 | 52 | 56 | 64 | 108 | 124))
}

/// Windows icon or cursor.
pub fn ico(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b"\x00\x00\x01\x00", b"\x00\x00\x02\x00"])
}

pub fn icns(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"icns")
}

pub fn psd(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"8BPS")
}

pub fn heic(raw: &[u8], _limit: u32) -> bool {
    ftyp(raw, &[b"heic", b"heix"])
}

pub fn heic_sequence(raw: &[u8], _limit: u32) -> bool {
    ftyp(raw, &[b"hevc", b"hevx"])
}

pub fn heif(raw: &[u8], _limit: u32) -> bool {
    ftyp(raw, &[b"mif1", b"heim", b"heis", b"avic"])
}

pub fn heif_sequence(raw: &[u8], _limit: u32) -> bool {
    ftyp(raw, &[b"msf1", b"hevm", b"hevs", b"avcs"])
}

/// Radiance RGBE.
pub fn hdr(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"#?RADIANCE\n")
}

pub fn xpm(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"/* XPM */")
}

pub fn bpg(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"BPG\xFB")
}

pub fn djvu(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"AT&TFORM")
        && raw
            .get(12..16)
            .is_some_and(|kind| matches!(kind, b"DJVU" | b"DJVM" | b"DJVI" | b"THUM"))
}

/// AutoCAD drawing, release 12 and later.
pub fn dwg(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"AC10")
        && raw.get(4..6).is_some_and(|version| {
            matches!(
                version,
                b"12" | b"13" | b"14" | b"15" | b"18" | b"21" | b"24" | b"27" | b"32"
            )
        })
}

pub fn xcf(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"gimp xcf")
}

/// GIMP pattern.
pub fn pat(raw: &[u8], _limit: u32) -> bool {
    offset(raw, b"GPAT", 20)
}

/// GIMP brush.
pub fn gbr(raw: &[u8], _limit: u32) -> bool {
    offset(raw, b"GIMP", 20)
}

/// Flexible Image Transport System.
pub fn fits(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"SIMPLE  =                    T")
}

/// DICOM: 128 byte preamble, then `DICM`.
pub fn dcm(raw: &[u8], _limit: u32) -> bool {
    offset(raw, b"DICM", 128)
}
