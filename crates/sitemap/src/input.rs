//! URL list parsing.
//!
//! Two line-oriented formats are accepted:
//!
//! ```text
//! # TSV: url [TAB lastmod [TAB group]]
//! https://example.com/	2024-01-01	pages
//! https://example.com/blog/hello	2024-02-03T10:00:00+01:00	My Posts
//! ```
//!
//! ```text
//! {"url": "https://example.com/", "lastmod": "2024-01-01", "group": "pages"}
//! ```

use std::path::Path;

use chrono::{DateTime, NaiveDate};
use clap::ValueEnum;
use serde::Deserialize;
use sitemap_core::LastModified;

/// Error parsing a URL list.
#[derive(Debug, thiserror::Error)]
pub(crate) enum InputError {
    #[error("line {line}: invalid JSON: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },

    #[error("line {line}: missing URL")]
    MissingUrl { line: usize },
}

/// Format of a URL list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum InputFormat {
    /// Tab-separated `url`, `lastmod`, `group`.
    Tsv,
    /// One JSON object per line.
    Jsonl,
}

impl InputFormat {
    /// Guess the format from a file extension, defaulting to TSV.
    pub(crate) fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("jsonl" | "ndjson") => Self::Jsonl,
            _ => Self::Tsv,
        }
    }
}

/// A parsed URL list line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct InputEntry {
    pub(crate) url: String,
    pub(crate) last_modified: Option<LastModified>,
    pub(crate) group: String,
}

#[derive(Deserialize)]
struct JsonEntry {
    url: String,
    #[serde(default, alias = "last_modified")]
    lastmod: Option<String>,
    #[serde(default)]
    group: Option<String>,
}

/// Parse `content` in the given format.
///
/// Blank lines are skipped, as are TSV lines starting with `#`.
pub(crate) fn parse(content: &str, format: InputFormat) -> Result<Vec<InputEntry>, InputError> {
    let lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    match format {
        InputFormat::Tsv => lines
            .filter(|(_, line)| !line.trim_start().starts_with('#'))
            .map(|(line_no, line)| parse_tsv_line(line_no, line))
            .collect(),
        InputFormat::Jsonl => lines
            .map(|(line_no, line)| parse_json_line(line_no, line))
            .collect(),
    }
}

fn parse_tsv_line(line_no: usize, line: &str) -> Result<InputEntry, InputError> {
    let mut fields = line.split('\t');
    let url = fields.next().unwrap_or_default().trim();
    if url.is_empty() {
        return Err(InputError::MissingUrl { line: line_no });
    }
    let last_modified = fields.next().and_then(parse_last_modified);
    let group = fields.next().unwrap_or_default().trim();

    Ok(InputEntry {
        url: url.to_owned(),
        last_modified,
        group: group.to_owned(),
    })
}

fn parse_json_line(line_no: usize, line: &str) -> Result<InputEntry, InputError> {
    let entry: JsonEntry = serde_json::from_str(line).map_err(|source| InputError::Json {
        line: line_no,
        source,
    })?;
    if entry.url.trim().is_empty() {
        return Err(InputError::MissingUrl { line: line_no });
    }

    Ok(InputEntry {
        url: entry.url,
        last_modified: entry.lastmod.as_deref().and_then(parse_last_modified),
        group: entry.group.unwrap_or_default(),
    })
}

/// Interpret a lastmod field.
///
/// RFC 3339 timestamps and `YYYY-MM-DD` dates become dates; anything else is
/// kept verbatim.
fn parse_last_modified(raw: &str) -> Option<LastModified> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.into());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.into());
    }
    Some(LastModified::Formatted(raw.to_owned()))
}
