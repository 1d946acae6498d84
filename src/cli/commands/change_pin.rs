//! `sec change-pin` — replace the current PIN.

use crate::cli::output;
use crate::cli::prompt::TerminalPinSource;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `change-pin` command.
pub fn execute(cli: &Cli) -> Result<()> {
    // Unlocking verifies the current PIN.
    let mut vault = unlock(cli)?;
    vault.change_pin(&mut TerminalPinSource)?;
    output::success("PIN changed.");
    Ok(())
}
