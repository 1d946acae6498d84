//! `sec export` — dump every secret in plaintext.
//!
//! `--format json` (default) writes one JSON object; `--format env`
//! writes `NAME=value` lines that `sec import` reads back unchanged.
//! PIN metadata is never part of the output.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::prompt::TerminalPinSource;
use crate::cli::{engine, Cli};
use crate::errors::{Result, SecError};
use crate::private_file;

/// Execute the `export` command.
pub fn execute(cli: &Cli, format: &str, output_path: Option<&str>) -> Result<()> {
    let render: fn(&BTreeMap<String, String>) -> Result<String> = match format {
        "json" => to_json,
        "env" => to_env,
        other => {
            return Err(SecError::CommandFailed(format!(
                "unknown export format '{other}' — use 'json' or 'env'"
            )));
        }
    };

    let engine = engine(cli)?;
    let vault = engine.unlock_and_load(&mut TerminalPinSource)?;
    let content = render(vault.entries())?;

    let Some(dest) = output_path else {
        print!("{content}");
        return Ok(());
    };

    let dest = Path::new(dest);
    if let Some(protected) = [engine.vault_path(), engine.key_path()]
        .into_iter()
        .find(|p| same_file(dest, p))
    {
        return Err(SecError::CommandFailed(format!(
            "refusing to export over {}",
            protected.display()
        )));
    }

    private_file::replace(dest, content.as_bytes())?;
    output::success(&format!(
        "Exported {} secret(s) to {} ({format})",
        vault.secret_count(),
        dest.display()
    ));
    output::warning("The export is plaintext. Delete it when you are done.");
    Ok(())
}

/// Whether `a` and `b` name the same file, comparing canonical paths
/// when both exist.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn to_json(secrets: &BTreeMap<String, String>) -> Result<String> {
    serde_json::to_string_pretty(secrets)
        .map(|json| json + "\n")
        .map_err(|e| SecError::SerializationError(format!("JSON export: {e}")))
}

/// Render `.env` lines, failing on names the env format cannot carry.
fn to_env(secrets: &BTreeMap<String, String>) -> Result<String> {
    let mut out = String::new();
    for (name, value) in secrets {
        check_env_name(name)?;
        if needs_quotes(value) {
            let _ = writeln!(out, "{name}=\"{}\"", escape(value));
        } else {
            let _ = writeln!(out, "{name}={value}");
        }
    }
    Ok(out)
}

/// Reject names that would not parse back to themselves.
fn check_env_name(name: &str) -> Result<()> {
    let problem = if name.contains('=') {
        Some("contains '='")
    } else if name.contains(['\n', '\r']) {
        Some("contains a line break")
    } else if name.starts_with('#') {
        Some("starts with '#'")
    } else if name.trim() != name {
        Some("has leading or trailing whitespace")
    } else if name.starts_with("export ") {
        Some("starts with 'export '")
    } else {
        None
    };

    match problem {
        Some(why) => Err(SecError::InvalidSecretName(format!(
            "'{}' {why} and cannot be exported as env; use --format json",
            name.escape_debug()
        ))),
        None => Ok(()),
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.trim() != value
        || value.contains([' ', '#', '"', '\'', '\\', '$', '\n', '\r'])
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
