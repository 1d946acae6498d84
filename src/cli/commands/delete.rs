//! `sec delete NAME` — remove a secret.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let mut vault = unlock(cli)?;

    // Absent names are a no-op, so there is nothing to confirm.
    if vault.get(name).is_none() {
        output::info(&format!("No secret named '{name}'; nothing deleted."));
        return Ok(());
    }

    let go_ahead = force
        || Confirm::new()
            .with_prompt(format!("Permanently delete '{name}'?"))
            .default(false)
            .interact()?;
    if !go_ahead {
        output::info("Kept it.");
        return Ok(());
    }

    vault.delete(name)?;
    output::success(&format!(
        "Deleted '{name}' ({} secret(s) left)",
        vault.secret_count()
    ));
    Ok(())
}
