//! `sec completions <shell>` — print a shell completion script.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    write_script(shell, &mut io::stdout())
}

fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    clap_complete::generate(shell, &mut Cli::command(), "sec", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn bash_script_knows_every_subcommand() {
        let mut buf = Vec::new();
        write_script(Shell::Bash, &mut buf).unwrap();
        let script = String::from_utf8(buf).unwrap();
        for sub in ["set-pin", "change-pin", "remove-pin", "export", "import"] {
            assert!(script.contains(sub), "missing {sub}");
        }
    }

    #[test]
    fn shell_names_are_parsed_by_clap() {
        let cli = Cli::parse_from(["sec", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            crate::cli::Commands::Completions { shell: Shell::Zsh }
        ));
        assert!(Cli::try_parse_from(["sec", "completions", "tcsh"]).is_err());
    }
}
