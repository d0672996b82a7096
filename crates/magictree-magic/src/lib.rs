//! Byte signature predicates for magictree.
//!
//! Every function in this crate has the same shape,
//! `fn(raw: &[u8], limit: u32) -> bool`, and answers one question: does
//! `raw` look like a particular format? The functions know nothing about
//! the classification tree that orders them; `magictree-core` wires them
//! into a hierarchy and decides which ones run.
//!
//! # Contract
//!
//! - `raw` is the leading part of the input, already cut to at most `limit`
//!   bytes by the caller.
//! - `limit` is the cap the caller applied. Text-like predicates compare it
//!   with `raw.len()` to tell "the document ends here" from "the document
//!   was cut here".
//! - Predicates are total: short, empty, or malformed input is a plain
//!   `false`, never a panic.
//!
//! # Usage
//!
//! ```
//! use magictree_magic::{archive, image};
//!
//! assert!(archive::gzip(&[0x1f, 0x8b, 0x08], 3072));
//! assert!(!image::png(b"GIF89a", 3072));
//! ```
//!
//! # Modules
//!
//! - [`archive`]: compressed streams and archive containers
//! - [`audio`], [`video`], [`image`]: media formats
//! - [`document`]: PDF, PostScript, OLE and ZIP-based office documents
//! - [`executable`]: binaries, bytecode and ROM images
//! - [`font`]: font files
//! - [`data`]: databases, geometry and other structured binary data
//! - [`text`], [`markup`], [`structured`]: text detection and its children

pub mod archive;
pub mod audio;
pub mod data;
pub mod document;
pub mod executable;
pub mod font;
pub mod image;
pub mod markup;
pub mod structured;
pub mod text;
pub mod video;

/// Signature predicate: `raw` is the (limited) input, `limit` the cap applied to it.
pub type Magic = fn(&[u8], u32) -> bool;

pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ============================================================================
// Shared helpers
// ============================================================================

/// True when `raw` starts with any of `signatures`.
pub(crate) fn prefix(raw: &[u8], signatures: &[&[u8]]) -> bool {
    signatures.iter().any(|sig| raw.starts_with(sig))
}

/// True when `signature` occurs in `raw` at byte position `at`.
pub(crate) fn offset(raw: &[u8], signature: &[u8], at: usize) -> bool {
    raw.get(at..).is_some_and(|tail| tail.starts_with(signature))
}

/// Position of the first occurrence of `needle` in `haystack`.
pub(crate) fn index_of(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    index_of(haystack, needle).is_some()
}

/// ISO base media file: `ftyp` box first, major brand one of `brands`.
pub(crate) fn ftyp(raw: &[u8], brands: &[&[u8]]) -> bool {
    if !offset(raw, b"ftyp", 4) {
        return false;
    }
    raw.get(8..12)
        .is_some_and(|major| brands.iter().any(|brand| major == *brand))
}

/// RIFF container whose form type is `form`.
pub(crate) fn riff(raw: &[u8], form: &[u8]) -> bool {
    raw.starts_with(b"RIFF") && offset(raw, form, 8)
}

/// Skip a UTF-8 byte order mark and leading ASCII whitespace.
pub(crate) fn trim_start(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    raw.trim_ascii_start()
}

/// Whether the caller cut the input at `limit` (the document may continue).
pub(crate) fn truncated(seen: usize, limit: u32) -> bool {
    u64::try_from(seen).is_ok_and(|seen| seen >= u64::from(limit))
}

pub(crate) fn le_u16(raw: &[u8], at: usize) -> Option<u16> {
    let bytes = raw.get(at..at.checked_add(2)?)?;
    Some(u16::from_le_bytes(bytes.try_into().ok()?))
}

pub(crate) fn le_u32(raw: &[u8], at: usize) -> Option<u32> {
    let bytes = raw.get(at..at.checked_add(4)?)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

pub(crate) fn be_u16(raw: &[u8], at: usize) -> Option<u16> {
    let bytes = raw.get(at..at.checked_add(2)?)?;
    Some(u16::from_be_bytes(bytes.try_into().ok()?))
}

pub(crate) fn be_u32(raw: &[u8], at: usize) -> Option<u32> {
    let bytes = raw.get(at..at.checked_add(4)?)?;
    Some(u32::from_be_bytes(bytes.try_into().ok()?))
}
