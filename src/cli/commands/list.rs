//! `sec list` — display all secret names.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = unlock(cli)?;
    let names = vault.list();

    output::info(&format!("{} secret(s)", names.len()));
    output::print_names_table(&names);

    Ok(())
}
