//! `sec import FILE` — merge plaintext secrets into the vault.
//!
//! The file is a JSON object or a `.env` file.  The format comes from
//! `--format`, else from the extension (`.env` or a file named `.env`),
//! else JSON.  Existing names are overwritten; everything is saved once.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::cli::env_parser;
use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{Result, SecError};

/// Execute the `import` command.
pub fn execute(cli: &Cli, file_path: &str, format: Option<&str>) -> Result<()> {
    let source = Path::new(file_path);
    let format = format.unwrap_or_else(|| guess_format(source));

    // Read the file before unlocking so a bad path never asks for a PIN.
    let incoming = match format {
        "env" => env_parser::parse_env_file(source)?,
        "json" => read_json(source)?,
        other => {
            return Err(SecError::CommandFailed(format!(
                "unknown import format '{other}' — use 'json' or 'env'"
            )));
        }
    };

    if incoming.is_empty() {
        output::warning(&format!("{} holds no secrets.", source.display()));
        return Ok(());
    }

    let mut vault = unlock(cli)?;
    let before = vault.secret_count();
    let count = vault.import(incoming)?;

    output::success(&format!(
        "Imported {count} secret(s) from {} ({} new, {} total)",
        source.display(),
        vault.secret_count() - before,
        vault.secret_count()
    ));
    Ok(())
}

fn guess_format(path: &Path) -> &'static str {
    let is_env = path.extension().is_some_and(|ext| ext == "env")
        || path.file_name().is_some_and(|name| name == ".env");
    if is_env {
        "env"
    } else {
        "json"
    }
}

/// A JSON object; non-string values are stored as their JSON text.
fn read_json(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path).map_err(SecError::io("read import file", path))?;
    let object: BTreeMap<String, Value> = serde_json::from_str(&text)
        .map_err(|e| SecError::InvalidFormat(format!("{}: {e}", path.display())))?;

    Ok(object
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(s) => (name, s),
            other => (name, other.to_string()),
        })
        .collect())
}
