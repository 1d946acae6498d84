//! `sec remove-pin` — turn off PIN gating.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `remove-pin` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut vault = unlock(cli)?;
    vault.remove_pin()?;
    output::success("PIN removed.");
    Ok(())
}
