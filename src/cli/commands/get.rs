//! `sec get` — retrieve and print a single secret's value.

use crate::cli::{unlock, Cli};
use crate::errors::{Result, SecError};

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let vault = unlock(cli)?;

    let value = vault
        .get(name)
        .ok_or_else(|| SecError::SecretNotFound(name.to_string()))?;
    println!("{value}");

    Ok(())
}
