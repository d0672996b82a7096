//! Text and JSON rendering of detection results and the format list.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use magictree_core::{DetectError, Entry, MimeType};
use serde::Serialize;

use crate::OutputFormat;

/// Outcome of classifying one input.
pub(crate) struct Detection {
    pub source: String,
    pub mime: Arc<MimeType>,
    pub error: Option<String>,
}

impl Detection {
    pub fn from_result(source: String, result: Result<Arc<MimeType>, DetectError>) -> Self {
        match result {
            Ok(mime) => Self {
                source,
                mime,
                error: None,
            },
            Err(err) => Self {
                source,
                mime: err.mime(),
                error: Some(format!("{}: {}", err, err.io_error())),
            },
        }
    }

    pub fn failed(source: String, reason: String) -> Self {
        Self {
            source,
            mime: magictree_core::Registry::failure(),
            error: Some(reason),
        }
    }
}

#[derive(Serialize)]
struct DetectionReport<'a> {
    path: &'a str,
    mime: &'a str,
    extension: &'a str,
    aliases: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    depth: usize,
    mime: &'a str,
    extension: &'a str,
    aliases: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
}

pub(crate) fn print_detections(detections: &[Detection], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let reports: Vec<DetectionReport<'_>> = detections
                .iter()
                .map(|detection| DetectionReport {
                    path: &detection.source,
                    mime: detection.mime.identifier(),
                    extension: detection.mime.extension(),
                    aliases: detection.mime.aliases(),
                    error: detection.error.as_deref(),
                })
                .collect();
            print_json(&reports)
        }
        OutputFormat::Text => {
            let mut stdout = io::stdout().lock();
            for detection in detections {
                match &detection.error {
                    None => writeln!(
                        stdout,
                        "{}: {}",
                        detection.source.bold(),
                        detection.mime.identifier().green()
                    )?,
                    Some(reason) => eprintln!(
                        "{}: {} {}",
                        detection.source.bold(),
                        "error:".red(),
                        reason
                    ),
                }
            }
            Ok(())
        }
    }
}

pub(crate) fn print_list(entries: &[Entry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let list: Vec<ListEntry<'_>> = entries
                .iter()
                .map(|entry| ListEntry {
                    depth: entry.depth,
                    mime: entry.mime.identifier(),
                    extension: entry.mime.extension(),
                    aliases: entry.mime.aliases(),
                    parent: entry.mime.parent().map(|parent| parent.identifier()),
                })
                .collect();
            print_json(&list)
        }
        OutputFormat::Text => {
            let mut stdout = io::stdout().lock();
            for entry in entries {
                writeln!(stdout, "{}", list_line(entry))?;
            }
            Ok(())
        }
    }
}

fn list_line(entry: &Entry) -> String {
    let mut line = format!("{}{}", "  ".repeat(entry.depth), entry.mime.identifier());
    if !entry.mime.extension().is_empty() {
        line.push_str(&format!(" {}", entry.mime.extension().dimmed()));
    }
    if !entry.mime.aliases().is_empty() {
        line.push_str(&format!(" [{}]", entry.mime.aliases().join(", ")));
    }
    line
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use magictree_core::Registry;

    #[test]
    fn list_line_indents_by_depth() {
        colored::control::set_override(false);
        let registry = Registry::with_defaults();
        let entries = registry.supported();
        let gzip = entries
            .iter()
            .find(|entry| entry.mime.identifier() == "application/gzip")
            .unwrap();
        let line = list_line(gzip);
        assert!(line.starts_with("  application/gzip .gz [application/x-gzip, "));

        let ott = entries
            .iter()
            .find(|entry| entry.mime.identifier().ends_with("text-template"))
            .unwrap();
        assert!(list_line(ott).starts_with("      application/vnd.oasis.opendocument.text-template"));
    }

    #[test]
    fn failed_detection_uses_sentinel() {
        let detection = Detection::failed("dir".to_string(), "is a directory".to_string());
        assert_eq!(detection.mime.identifier(), "application/octet-stream");
        assert!(detection.mime.parent().is_none());
        assert_eq!(detection.error.as_deref(), Some("is a directory"));
    }
}
