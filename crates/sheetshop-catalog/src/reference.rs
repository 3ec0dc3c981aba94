//! Spreadsheet reference resolution.
//!
//! Users hand the bot a spreadsheet URL; the remote API wants the bare
//! document identifier embedded in its `/spreadsheets/d/<id>` path segment.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CatalogError, Result};

/// Identifier of a remote spreadsheet document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpreadsheetId(String);

impl SpreadsheetId {
    /// Accept either a spreadsheet URL or an already bare identifier
    pub fn parse(url_or_id: &str) -> Result<Self> {
        let candidate = url_or_id.trim();
        if candidate.contains("/spreadsheets/d/") {
            return resolve_id(candidate);
        }
        if !candidate.is_empty() && candidate.chars().all(is_id_char) {
            return Ok(SpreadsheetId(candidate.to_string()));
        }
        Err(CatalogError::MalformedReference(url_or_id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SpreadsheetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Extract the spreadsheet identifier from a URL
///
/// Looks for `/spreadsheets/d/<id>` anywhere in the input, where `<id>` is
/// made of ASCII letters, digits, `-` and `_`. There is no fallback: input
/// without that segment is a [`CatalogError::MalformedReference`].
pub fn resolve_id(url: &str) -> Result<SpreadsheetId> {
    static ID_RE: OnceLock<Regex> = OnceLock::new();
    let re = ID_RE.get_or_init(|| Regex::new(r"/spreadsheets/d/([a-zA-Z0-9\-_]+)").unwrap());

    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| SpreadsheetId(m.as_str().to_string()))
        .ok_or_else(|| CatalogError::MalformedReference(url.to_string()))
}
