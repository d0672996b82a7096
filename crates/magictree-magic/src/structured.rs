//! JSON family and delimiter separated values.
//!
//! These predicates parse rather than probe a signature, so they need to
//! know whether the input was cut by the caller's limit: a document that
//! only fails to parse because it ends early is accepted when
//! `raw.len()` reached `limit`.

use std::sync::OnceLock;

use regex::bytes::Regex;

use crate::{trim_start, truncated};

static GEOJSON_PATTERN: OnceLock<Regex> = OnceLock::new();
static HAR_PATTERN: OnceLock<Regex> = OnceLock::new();

fn geojson_pattern() -> &'static Regex {
    GEOJSON_PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?s)^\s*\{.*?"type"\s*:\s*"(?:Feature|FeatureCollection|Point|LineString|Polygon|MultiPoint|MultiLineString|MultiPolygon|GeometryCollection)""#,
        )
        .unwrap()
    })
}

fn har_pattern() -> &'static Regex {
    HAR_PATTERN.get_or_init(|| Regex::new(r#"^\s*\{\s*"log"\s*:\s*\{"#).unwrap())
}

/// Parse `value` as JSON; an end-of-input error counts as success when the
/// input was truncated.
fn parses(value: &[u8], seen: usize, limit: u32) -> bool {
    match serde_json::from_slice::<serde_json::Value>(value) {
        Ok(_) => true,
        Err(err) => err.is_eof() && truncated(seen, limit),
    }
}

/// JSON object or array.
pub fn json(raw: &[u8], limit: u32) -> bool {
    let body = trim_start(raw);
    matches!(body.first(), Some(b'{' | b'[')) && parses(body, raw.len(), limit)
}

/// GeoJSON object. Tried only after [`json`] accepted the input.
pub fn geojson(raw: &[u8], _limit: u32) -> bool {
    geojson_pattern().is_match(trim_start(raw))
}

/// HTTP Archive. Tried only after [`json`] accepted the input.
pub fn har(raw: &[u8], _limit: u32) -> bool {
    har_pattern().is_match(trim_start(raw))
}

/// Newline delimited JSON: at least two lines, each an object or array.
/// A last line cut by the limit is ignored.
pub fn ndjson(raw: &[u8], limit: u32) -> bool {
    let mut lines: Vec<&[u8]> = raw
        .split(|&b| b == b'\n')
        .map(<[u8]>::trim_ascii)
        .collect();
    if truncated(raw.len(), limit) && !raw.ends_with(b"\n") {
        lines.pop();
    }
    let lines: Vec<&[u8]> = lines.into_iter().filter(|line| !line.is_empty()).collect();

    lines.len() >= 2
        && lines.iter().all(|line| {
            matches!(line.first(), Some(b'{' | b'['))
                && serde_json::from_slice::<serde_json::Value>(line).is_ok()
        })
}

pub fn csv(raw: &[u8], limit: u32) -> bool {
    separated(raw, b',', limit)
}

pub fn tsv(raw: &[u8], limit: u32) -> bool {
    separated(raw, b'\t', limit)
}

/// At least two records with the same number (> 1) of fields.
fn separated(raw: &[u8], delimiter: u8, limit: u32) -> bool {
    let mut lines: Vec<&[u8]> = raw
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect();
    // Either the empty tail after a final newline, or a record cut by the limit.
    if raw.ends_with(b"\n") || truncated(raw.len(), limit) {
        lines.pop();
    }

    let mut counts = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| field_count(line, delimiter));
    let Some(fields) = counts.next() else {
        return false;
    };
    let mut records = 1;
    for count in counts {
        if count != fields {
            return false;
        }
        records += 1;
    }
    fields > 1 && records >= 2
}

/// Delimiters outside double quotes, plus one.
fn field_count(line: &[u8], delimiter: u8) -> usize {
    let mut quoted = false;
    let mut fields = 1;
    for &b in line {
        if b == b'"' {
            quoted = !quoted;
        } else if b == delimiter && !quoted {
            fields += 1;
        }
    }
    fields
}
