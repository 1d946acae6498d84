//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod env_parser;
pub mod output;
pub mod prompt;

use clap::Parser;

use crate::config::{expand_path, Settings};
use crate::errors::Result;
use crate::vault::{Vault, VaultEngine};

use self::prompt::TerminalPinSource;

/// sec: local encrypted secret vault.
#[derive(Parser)]
#[command(name = "sec", about = "Local encrypted secret vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the secrets file (default: ~/.sec.enc)
    #[arg(short, long, env = "SEC_FILE", global = true)]
    pub file: Option<String>,

    /// Path to the key file (default: ~/.sec.key)
    #[arg(long, env = "SEC_KEY_FILE", global = true)]
    pub key_file: Option<String>,

    /// Path to the config file
    #[arg(long, env = "SEC_CONFIG", default_value = Settings::DEFAULT_PATH, global = true)]
    pub config: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set a secret value
    Set {
        /// Secret name
        name: String,
        /// Secret value (omit for interactive prompt or piped stdin)
        value: Option<String>,
    },

    /// Get a secret value
    Get {
        /// Secret name
        name: String,
    },

    /// Delete a secret
    Delete {
        /// Secret name
        name: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// List all stored secret names
    List,

    /// Set a new PIN to lock the vault
    SetPin,

    /// Change the current PIN
    ChangePin,

    /// Remove the current PIN
    RemovePin,

    /// Export secrets in plaintext to a file or stdout
    Export {
        /// Output format: json (default) or env
        #[arg(long, default_value = "json")]
        format: String,

        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import plaintext secrets from a file
    Import {
        /// Path to the file to import
        file: String,

        /// Import format: json or env (auto-detected from extension)
        #[arg(long)]
        format: Option<String>,
    },

    /// Print the version of sec
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the config file and apply CLI / env overrides.
pub fn settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(&expand_path(&cli.config)?)?;
    if let Some(file) = &cli.file {
        settings.vault_file = file.clone();
    }
    if let Some(key_file) = &cli.key_file {
        settings.key_file = key_file.clone();
    }
    Ok(settings)
}

/// Build the engine for this invocation.
pub fn engine(cli: &Cli) -> Result<VaultEngine> {
    VaultEngine::from_settings(&settings(cli)?)
}

/// Load the key and vault, prompting for the PIN if one is set.
pub fn unlock(cli: &Cli) -> Result<Vault> {
    engine(cli)?.unlock_and_load(&mut TerminalPinSource)
}
