//! `~/.sec.toml`: where the vault and key live, and how PINs are hashed.
//!
//! ```toml
//! vault_file = "~/.sec.enc"
//! key_file = "~/.sec.key"
//! max_pin_attempts = 3
//! argon2_memory_kib = 65536
//! argon2_iterations = 3
//! argon2_parallelism = 4
//! ```
//!
//! Every key is optional; a missing file means all defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::crypto::Argon2Params;
use crate::errors::{Result, SecError};
use crate::pin::PinGuard;

/// Resolved user configuration.  Paths are kept as written (possibly
/// starting with `~`) and expanded on use.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub vault_file: String,
    pub key_file: String,
    /// Wrong PINs allowed before the command aborts.
    pub max_pin_attempts: u32,
    /// Argon2id cost for newly hashed PINs.
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let argon2 = Argon2Params::default();
        Self {
            vault_file: "~/.sec.enc".into(),
            key_file: "~/.sec.key".into(),
            max_pin_attempts: PinGuard::DEFAULT_MAX_ATTEMPTS,
            argon2_memory_kib: argon2.memory_kib,
            argon2_iterations: argon2.iterations,
            argon2_parallelism: argon2.parallelism,
        }
    }
}

impl Settings {
    /// Default location of the config file.
    pub const DEFAULT_PATH: &'static str = "~/.sec.toml";

    /// Read and validate the config at `path`; defaults if it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(SecError::io("read config", path)(e)),
        };

        let settings: Self = toml::from_str(&text)
            .map_err(|e| SecError::Configuration(format!("{}: {e}", path.display())))?;
        settings
            .validate()
            .map_err(|msg| SecError::Configuration(format!("{}: {msg}", path.display())))?;
        Ok(settings)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.max_pin_attempts == 0 {
            return Err("max_pin_attempts must be at least 1".into());
        }
        self.argon2_params().validate().map_err(|e| e.to_string())
    }

    /// Resolved vault file path.
    pub fn vault_path(&self) -> Result<PathBuf> {
        expand_path(&self.vault_file)
    }

    /// Resolved key file path.
    pub fn key_path(&self) -> Result<PathBuf> {
        expand_path(&self.key_file)
    }

    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// A `PinGuard` configured from these settings.
    pub fn pin_guard(&self) -> PinGuard {
        PinGuard::new(self.argon2_params(), self.max_pin_attempts)
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Only `~` and `~/...` are expanded; `~user` forms are left alone.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return Ok(PathBuf::from(raw)),
    };

    let home = dirs::home_dir().ok_or_else(|| {
        SecError::Configuration(format!("cannot expand '{raw}': home directory not found"))
    })?;

    let rest = rest.trim_start_matches(['/', '\\']);
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}
