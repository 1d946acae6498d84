//! Reader for the `.env` files accepted by `sec import`.
//!
//! One `NAME=value` per line.  Blank lines and `#` comments are skipped
//! and an optional `export ` prefix is ignored.  Double-quoted values
//! understand `\n`, `\r`, `\"` and `\\`; single-quoted values are taken
//! literally; bare values are trimmed.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::{Result, SecError};

/// How a value was written on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quoting {
    Bare,
    Single,
    Double,
}

/// Split one line into name, unquoted value and quoting style.
///
/// `None` for blank lines, comments, lines without `=`, and lines whose
/// name is empty.
fn split_line(line: &str) -> Option<(&str, &str, Quoting)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);

    let (name, raw) = line.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let raw = raw.trim();
    let (value, quoting) = match (unwrap_quotes(raw, '"'), unwrap_quotes(raw, '\'')) {
        (Some(v), _) => (v, Quoting::Double),
        (None, Some(v)) => (v, Quoting::Single),
        (None, None) => (raw, Quoting::Bare),
    };
    Some((name, value, quoting))
}

/// `raw` without its surrounding `q` quotes, if it has both.
fn unwrap_quotes(raw: &str, q: char) -> Option<&str> {
    raw.strip_prefix(q)?.strip_suffix(q)
}

/// Undo the escaping applied inside double quotes.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Parse `.env` text.  Later duplicates win.
pub fn parse_env(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(split_line)
        .map(|(name, value, quoting)| {
            let value = match quoting {
                Quoting::Double => unescape(value),
                Quoting::Single | Quoting::Bare => value.to_string(),
            };
            (name.to_string(), value)
        })
        .collect()
}

/// Read and parse a `.env` file.
pub fn parse_env_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path).map_err(SecError::io("read import file", path))?;
    Ok(parse_env(&content))
}
