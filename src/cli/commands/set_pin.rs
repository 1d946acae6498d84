//! `sec set-pin` — lock the vault behind a PIN.

use crate::cli::output;
use crate::cli::prompt::TerminalPinSource;
use crate::cli::{unlock, Cli};
use crate::errors::{Result, SecError};

/// Execute the `set-pin` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut vault = unlock(cli)?;

    match vault.set_pin(&mut TerminalPinSource) {
        Ok(()) => {
            output::success("PIN set.");
            output::tip("Every command will now ask for it.");
            Ok(())
        }
        // Not fatal: the vault is untouched and the user just needs a different verb.
        Err(e @ SecError::PinAlreadySet) => {
            output::warning(&e.to_string());
            Ok(())
        }
        Err(e) => Err(e),
    }
}
