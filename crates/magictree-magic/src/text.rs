//! Plain text detection and the text formats recognised by their first
//! line: HTML, scripts (via shebang), RTF, vCard, iCalendar and WARC.
//!
//! [`text`] is the slowest predicate in the crate because it scans the
//! whole input; catalogs should try it after every binary signature.

use crate::{UTF8_BOM, contains, prefix, trim_start};

const UTF16_BE_BOM: &[u8] = b"\xFE\xFF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";

/// Tags that open an HTML document. Each must be followed by a space or `>`.
const HTML_TAGS: &[&[u8]] = &[
    b"<!DOCTYPE HTML",
    b"<HTML",
    b"<HEAD",
    b"<SCRIPT",
    b"<IFRAME",
    b"<H1",
    b"<DIV",
    b"<FONT",
    b"<TABLE",
    b"<A",
    b"<STYLE",
    b"<TITLE",
    b"<B",
    b"<BODY",
    b"<BR",
    b"<P",
    b"<!--",
];

/// Control bytes that do not occur in text (tab, line feed, form feed,
/// carriage return and escape are allowed).
fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

/// Text: a Unicode byte order mark, or no binary control bytes at all.
/// Empty input is not text.
pub fn text(raw: &[u8], _limit: u32) -> bool {
    if raw.is_empty() {
        return false;
    }
    if prefix(raw, &[UTF8_BOM, UTF16_BE_BOM, UTF16_LE_BOM]) {
        return true;
    }
    !raw.iter().copied().any(is_binary_byte)
}

fn starts_with_tag(raw: &[u8], tag: &[u8]) -> bool {
    raw.len() > tag.len()
        && raw[..tag.len()].eq_ignore_ascii_case(tag)
        && matches!(raw[tag.len()], b' ' | b'>')
}

pub fn html(raw: &[u8], _limit: u32) -> bool {
    let raw = trim_start(raw);
    HTML_TAGS.iter().any(|tag| starts_with_tag(raw, tag))
}

pub fn svg(raw: &[u8], _limit: u32) -> bool {
    trim_start(raw).starts_with(b"<") && contains(raw, b"<svg")
}

// ============================================================================
// Shebang scripts
// ============================================================================

/// Whether the `#!` line names one of `interpreters`, directly or through
/// `env`. A trailing version (`python3.12`, `perl5`) is accepted.
fn shebang(raw: &[u8], interpreters: &[&[u8]]) -> bool {
    let Some(rest) = raw.strip_prefix(b"#!") else {
        return false;
    };
    let line = rest.split(|&b| b == b'\n').next().unwrap_or(rest);
    let mut words = line
        .split(|b| b.is_ascii_whitespace())
        .filter(|word| !word.is_empty());

    let Some(first) = words.next() else {
        return false;
    };
    let mut program = first.rsplit(|&b| b == b'/').next().unwrap_or(first);
    if program == b"env" {
        match words.find(|word| !word.starts_with(b"-")) {
            Some(named) => program = named,
            None => return false,
        }
    }

    interpreters.iter().any(|interpreter| {
        program
            .strip_prefix(*interpreter)
            .is_some_and(|version| version.iter().all(|b| b.is_ascii_digit() || *b == b'.'))
    })
}

pub fn php(raw: &[u8], _limit: u32) -> bool {
    let start = raw.get(..5).unwrap_or(raw);
    start.eq_ignore_ascii_case(b"<?php")
        || prefix(raw, &[b"<?\n", b"<?\r", b"<?="])
        || shebang(raw, &[b"php"])
}

pub fn js(raw: &[u8], _limit: u32) -> bool {
    shebang(raw, &[b"node", b"nodejs", b"deno", b"bun"])
}

pub fn lua(raw: &[u8], _limit: u32) -> bool {
    shebang(raw, &[b"lua", b"luajit"])
}

pub fn perl(raw: &[u8], _limit: u32) -> bool {
    shebang(raw, &[b"perl"])
}

pub fn python(raw: &[u8], _limit: u32) -> bool {
    shebang(raw, &[b"python", b"pypy"])
}

pub fn tcl(raw: &[u8], _limit: u32) -> bool {
    shebang(raw, &[b"tclsh", b"wish"])
}

// ============================================================================
// First-line markers
// ============================================================================

fn starts_with_ignore_case(raw: &[u8], marker: &[u8]) -> bool {
    raw.get(..marker.len())
        .is_some_and(|start| start.eq_ignore_ascii_case(marker))
}

/// `marker` on a line of its own (LF or CRLF), case-insensitive.
fn starts_with_line(raw: &[u8], marker: &[u8]) -> bool {
    starts_with_ignore_case(raw, marker)
        && matches!(&raw[marker.len()..], [b'\n', ..] | [b'\r', b'\n', ..])
}

pub fn rtf(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"{\\rtf")
}

pub fn vcard(raw: &[u8], _limit: u32) -> bool {
    starts_with_line(raw, b"BEGIN:VCARD")
}

pub fn icalendar(raw: &[u8], _limit: u32) -> bool {
    starts_with_line(raw, b"BEGIN:VCALENDAR")
}

/// Web ARChive.
pub fn warc(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b"WARC/1.0", b"WARC/1.1", b"WARC/0.1"])
}
