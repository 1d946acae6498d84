//! `sec set NAME [VALUE]` — store a secret.
//!
//! Without VALUE the secret is read from stdin when it is piped, or
//! from a hidden prompt otherwise.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `set` command.
pub fn execute(cli: &Cli, name: &str, value: Option<&str>) -> Result<()> {
    // A wrong PIN should fail before the user types the value.
    let mut vault = unlock(cli)?;

    let value = match value {
        Some(v) => Zeroizing::new(v.to_string()),
        None => read_value(name)?,
    };

    let verb = if vault.set(name, &value)? {
        "Updated"
    } else {
        "Stored"
    };
    output::success(&format!(
        "{verb} '{name}' ({} secret(s) in vault)",
        vault.secret_count()
    ));
    Ok(())
}

fn read_value(name: &str) -> Result<Zeroizing<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        let value = Password::new()
            .with_prompt(format!("Value for '{name}'"))
            .allow_empty_password(true)
            .interact()?;
        return Ok(Zeroizing::new(value));
    }

    let mut piped = Zeroizing::new(String::new());
    stdin.lock().read_to_string(&mut piped)?;
    let trimmed = piped.trim_end_matches(['\r', '\n']).len();
    piped.truncate(trimmed);
    Ok(piped)
}
