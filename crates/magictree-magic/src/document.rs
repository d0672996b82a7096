//! Document formats: PDF, PostScript, OLE compound files and ZIP based
//! office/e-book packages.

use crate::archive::zip_entry_names;
use crate::{le_u16, le_u32, offset, prefix};

const OLE_HEADER: &[u8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

// Root storage CLSIDs, stored in their on-disk (mixed endian) byte order.
const CLSID_WORD: &[u8] = b"\x06\x09\x02\x00\x00\x00\x00\x00\xC0\x00\x00\x00\x00\x00\x00\x46";
const CLSID_EXCEL_5: &[u8] = b"\x10\x08\x02\x00\x00\x00\x00\x00\xC0\x00\x00\x00\x00\x00\x00\x46";
const CLSID_EXCEL_8: &[u8] = b"\x20\x08\x02\x00\x00\x00\x00\x00\xC0\x00\x00\x00\x00\x00\x00\x46";
const CLSID_POWERPOINT: &[u8] =
    b"\x10\x8D\x81\x64\x9B\x4F\xCF\x11\x86\xEA\x00\xAA\x00\xB9\x29\xE8";
const CLSID_PUBLISHER: &[u8] = b"\x01\x12\x02\x00\x00\x00\x00\x00\xC0\x00\x00\x00\x00\x00\x00\x46";
const CLSID_OUTLOOK_MSG: &[u8] =
    b"\x0B\x0D\x02\x00\x00\x00\x00\x00\xC0\x00\x00\x00\x00\x00\x00\x46";

/// Zip packages written with a stored `mimetype` first entry put this
/// string (entry name followed by its content) at offset 30.
const ZIP_MIMETYPE_AT: usize = 30;

// ============================================================================
// PDF and PostScript
// ============================================================================

pub fn pdf(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b"%PDF-", b"\xEF\xBB\xBF%PDF-"])
}

/// Forms Data Format.
pub fn fdf(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"%FDF")
}

pub fn ps(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"%!PS-Adobe-")
}

// ============================================================================
// OLE compound files
// ============================================================================

pub fn ole(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(OLE_HEADER)
}

/// CLSID of the root storage entry, if the first directory sector is
/// within `raw`.
fn ole_root_clsid(raw: &[u8]) -> Option<&[u8]> {
    if !raw.starts_with(OLE_HEADER) {
        return None;
    }
    let shift = le_u16(raw, 30)?;
    if !(7..=16).contains(&shift) {
        return None;
    }
    let sector_size = 1usize << shift;
    let first_dir_sector = usize::try_from(le_u32(raw, 48)?).ok()?;
    let entry = first_dir_sector.checked_add(1)?.checked_mul(sector_size)?;
    raw.get(entry.checked_add(80)?..entry.checked_add(96)?)
}

fn ole_clsid_is(raw: &[u8], expected: &[&[u8]]) -> bool {
    ole_root_clsid(raw).is_some_and(|clsid| expected.contains(&clsid))
}

/// Advanced Authoring Format.
pub fn aaf(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(OLE_HEADER) && offset(raw, b"AAFB\x0D\x00OM", 8)
}

pub fn doc(raw: &[u8], _limit: u32) -> bool {
    ole_clsid_is(raw, &[CLSID_WORD])
}

pub fn xls(raw: &[u8], _limit: u32) -> bool {
    ole_clsid_is(raw, &[CLSID_EXCEL_5, CLSID_EXCEL_8])
}

pub fn ppt(raw: &[u8], _limit: u32) -> bool {
    ole_clsid_is(raw, &[CLSID_POWERPOINT])
}

pub fn publisher(raw: &[u8], _limit: u32) -> bool {
    ole_clsid_is(raw, &[CLSID_PUBLISHER])
}

/// Outlook message.
pub fn msg(raw: &[u8], _limit: u32) -> bool {
    ole_clsid_is(raw, &[CLSID_OUTLOOK_MSG])
}

// ============================================================================
// ZIP based packages
// ============================================================================

fn has_entry(raw: &[u8], matches: impl Fn(&[u8]) -> bool) -> bool {
    zip_entry_names(raw).any(matches)
}

pub fn xlsx(raw: &[u8], _limit: u32) -> bool {
    has_entry(raw, |name| name.starts_with(b"xl/"))
}

pub fn docx(raw: &[u8], _limit: u32) -> bool {
    has_entry(raw, |name| name.starts_with(b"word/"))
}

pub fn pptx(raw: &[u8], _limit: u32) -> bool {
    has_entry(raw, |name| name.starts_with(b"ppt/"))
}

pub fn jar(raw: &[u8], _limit: u32) -> bool {
    has_entry(raw, |name| name == b"META-INF/MANIFEST.MF" || name == b"META-INF/")
}

fn zip_mimetype(raw: &[u8], mime: &[u8]) -> bool {
    let Some(at_name) = raw.get(ZIP_MIMETYPE_AT..) else {
        return false;
    };
    at_name
        .strip_prefix(b"mimetype")
        .is_some_and(|content| content.starts_with(mime))
}

pub fn epub(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/epub+zip")
}

pub fn odt(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.oasis.opendocument.text")
}

pub fn ott(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.oasis.opendocument.text-template")
}

pub fn ods(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.oasis.opendocument.spreadsheet")
}

pub fn ots(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.oasis.opendocument.spreadsheet-template")
}

pub fn odp(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.oasis.opendocument.presentation")
}

pub fn otp(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.oasis.opendocument.presentation-template")
}

pub fn odg(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.oasis.opendocument.graphics")
}

pub fn otg(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.oasis.opendocument.graphics-template")
}

pub fn odf(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.oasis.opendocument.formula")
}

pub fn odc(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.oasis.opendocument.chart")
}

/// StarOffice/OpenOffice.org 1.x spreadsheet.
pub fn sxc(raw: &[u8], _limit: u32) -> bool {
    zip_mimetype(raw, b"application/vnd.sun.xml.calc")
}

// ============================================================================
// E-books, signatures and records
// ============================================================================

pub fn mobi(raw: &[u8], _limit: u32) -> bool {
    offset(raw, b"BOOKMOBI", 60)
}

/// Microsoft Reader.
pub fn lit(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"ITOLITLS")
}

/// PKCS#7 signed data, PEM armoured or DER encoded.
pub fn p7s(raw: &[u8], _limit: u32) -> bool {
    const SIGNED_DATA_OID: &[u8] = b"\x06\x09\x2A\x86\x48\x86\xF7\x0D\x01\x07\x02";

    if prefix(
        raw,
        &[b"-----BEGIN PKCS7", b"-----BEGIN PKCS #7", b"-----BEGIN CMS"],
    ) {
        return true;
    }
    match raw {
        [0x30, 0x80, rest @ ..] => rest.starts_with(SIGNED_DATA_OID),
        [0x30, 0x81, _, rest @ ..] => rest.starts_with(SIGNED_DATA_OID),
        [0x30, 0x82, _, _, rest @ ..] => rest.starts_with(SIGNED_DATA_OID),
        _ => false,
    }
}

/// MARC 21 bibliographic record: numeric record length, fixed leader tail.
pub fn marc(raw: &[u8], _limit: u32) -> bool {
    raw.get(..5).is_some_and(|len| len.iter().all(u8::is_ascii_digit))
        && offset(raw, b"4500", 20)
}
