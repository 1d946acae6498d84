//! Static key file management.
//!
//! The vault key is a 32-byte random file that lives next to (but
//! separate from) the vault, by default at `~/.sec.key`.  It is created
//! on first use and never rewritten afterwards: a key file with the
//! wrong length is reported, not repaired, because replacing it would
//! make every existing vault undecipherable.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rand::RngCore;
use tracing::{debug, info};
use zeroize::Zeroize;

use super::keys::{VaultKey, KEY_LEN};
use crate::errors::{Result, SecError};
use crate::private_file;

/// Owns the key file path and hands out the vault key.
#[derive(Debug, Clone)]
pub struct KeyManager {
    path: PathBuf,
}

impl KeyManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the key file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the key, generating and persisting a fresh one if the key
    /// file does not exist yet.
    pub fn get_or_create_key(&self) -> Result<VaultKey> {
        match self.read_key()? {
            Some(key) => Ok(key),
            None => self.create_key(),
        }
    }

    /// The stored key, or `None` if there is no key file.
    fn read_key(&self) -> Result<Option<VaultKey>> {
        let mut data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SecError::io("read key file", &self.path)(e)),
        };
        let key = key_from_bytes(&self.path, &data);
        data.zeroize();
        let key = key?;
        debug!(path = %self.path.display(), "loaded vault key");
        Ok(Some(key))
    }

    fn create_key(&self) -> Result<VaultKey> {
        let mut bytes = [0u8; KEY_LEN];
        rand::rng().fill_bytes(&mut bytes);

        // The key only appears under its real name once fully written, so
        // a failed write never leaves a short key file behind.
        let created = private_file::create_new(&self.path, &bytes);
        let key = VaultKey::new(bytes);
        bytes.zeroize();

        if created? {
            info!(path = %self.path.display(), "generated new vault key");
            return Ok(key);
        }

        // Another process created the key first; use theirs.
        debug!(path = %self.path.display(), "key file appeared concurrently");
        self.read_key()?.ok_or_else(|| {
            SecError::Configuration(format!(
                "key file {} vanished while being created",
                self.path.display()
            ))
        })
    }
}

/// Validate the length of raw key file contents.
fn key_from_bytes(path: &Path, data: &[u8]) -> Result<VaultKey> {
    let bytes: [u8; KEY_LEN] = data.try_into().map_err(|_| {
        SecError::Configuration(format!(
            "key file {} must be exactly {KEY_LEN} bytes, found {} — refusing to overwrite it",
            path.display(),
            data.len()
        ))
    })?;
    Ok(VaultKey::new(bytes))
}
