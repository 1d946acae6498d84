//! High-level vault operations used by CLI commands.
//!
//! `VaultEngine` wires the key manager, the store, and the PIN guard
//! together.  `unlock_and_load` returns a `Vault` session; every
//! mutating method on it persists before returning.  Mutations are
//! applied to a copy that replaces the session state only after the
//! atomic save succeeds, so a failed write changes nothing.
//!
//! There is no inter-process locking: two invocations saving the same
//! vault concurrently race, and the last writer wins.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use super::contents::VaultContents;
use super::store::VaultStore;
use crate::config::Settings;
use crate::crypto::{KeyManager, VaultKey};
use crate::errors::{Result, SecError};
use crate::pin::{Authorization, PinGuard, PinSource};

/// Entry point: knows where the key and the vault live.
#[derive(Debug, Clone)]
pub struct VaultEngine {
    keys: KeyManager,
    store: VaultStore,
    guard: PinGuard,
}

impl VaultEngine {
    pub fn new(keys: KeyManager, store: VaultStore, guard: PinGuard) -> Self {
        Self { keys, store, guard }
    }

    /// Build an engine from resolved settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            KeyManager::new(settings.key_path()?),
            VaultStore::new(settings.vault_path()?),
            settings.pin_guard(),
        ))
    }

    pub fn vault_path(&self) -> &Path {
        self.store.path()
    }

    pub fn key_path(&self) -> &Path {
        self.keys.path()
    }

    /// Get the key, load the vault, and check the PIN if one is set.
    pub fn unlock_and_load(&self, pins: &mut dyn PinSource) -> Result<Vault> {
        let key = self.keys.get_or_create_key()?;
        let contents = self.store.load(&key)?;
        let auth = self.guard.verify(&contents, pins)?;

        info!(
            path = %self.store.path().display(),
            secrets = contents.entries.len(),
            pin = PinGuard::is_set(&contents),
            "vault unlocked"
        );

        Ok(Vault {
            store: self.store.clone(),
            guard: self.guard.clone(),
            key,
            contents,
            auth,
        })
    }
}

/// An unlocked vault.
pub struct Vault {
    store: VaultStore,
    guard: PinGuard,
    key: VaultKey,
    contents: VaultContents,
    auth: Authorization,
}

impl Vault {
    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Look up a secret value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.contents.entries.get(name).map(String::as_str)
    }

    /// Names of all stored secrets.  PIN metadata is never included.
    pub fn list(&self) -> Vec<&str> {
        self.contents.entries.keys().map(String::as_str).collect()
    }

    /// All secrets, sorted by name.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.contents.entries
    }

    /// Returns the number of secrets in the vault.
    pub fn secret_count(&self) -> usize {
        self.contents.entries.len()
    }

    pub fn is_pin_set(&self) -> bool {
        PinGuard::is_set(&self.contents)
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    // ------------------------------------------------------------------
    // Secret mutations
    // ------------------------------------------------------------------

    /// Add or update a secret and persist.
    ///
    /// Returns `true` if an existing value was replaced.
    pub fn set(&mut self, name: &str, value: &str) -> Result<bool> {
        validate_secret_name(name)?;

        let mut next = self.contents.clone();
        let existed = next
            .entries
            .insert(name.to_string(), value.to_string())
            .is_some();
        self.commit(next)?;

        debug!(secret = name, existed, "secret set");
        Ok(existed)
    }

    /// Remove a secret and persist.
    ///
    /// Deleting a name that does not exist is a no-op that returns
    /// `false` and writes nothing.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        if !self.contents.entries.contains_key(name) {
            debug!(secret = name, "delete of absent secret ignored");
            return Ok(false);
        }

        let mut next = self.contents.clone();
        next.entries.remove(name);
        self.commit(next)?;

        debug!(secret = name, "secret deleted");
        Ok(true)
    }

    /// Merge `entries` into the vault with a single save.
    ///
    /// All names are validated before anything is written.
    pub fn import<I>(&mut self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut next = self.contents.clone();
        let mut count = 0;
        for (name, value) in entries {
            validate_secret_name(&name)?;
            next.entries.insert(name, value);
            count += 1;
        }

        if count > 0 {
            self.commit(next)?;
        }
        info!(count, "secrets imported");
        Ok(count)
    }

    // ------------------------------------------------------------------
    // PIN management
    // ------------------------------------------------------------------

    /// Turn on PIN gating.  Fails with `PinAlreadySet` before prompting
    /// if a PIN exists.
    pub fn set_pin(&mut self, pins: &mut dyn PinSource) -> Result<()> {
        if self.is_pin_set() {
            return Err(SecError::PinAlreadySet);
        }
        let pin = pins.read_new_pin()?;

        let mut next = self.contents.clone();
        let auth = self.guard.set_pin(&mut next, &pin)?;
        self.commit_with_auth(next, auth)
    }

    /// Replace the PIN.  The session was verified at unlock.
    pub fn change_pin(&mut self, pins: &mut dyn PinSource) -> Result<()> {
        if !self.is_pin_set() {
            return Err(SecError::PinNotSet);
        }
        let pin = pins.read_new_pin()?;

        let mut next = self.contents.clone();
        let auth = self.guard.change_pin(&mut next, &self.auth, &pin)?;
        self.commit_with_auth(next, auth)
    }

    /// Turn off PIN gating.
    pub fn remove_pin(&mut self) -> Result<()> {
        let mut next = self.contents.clone();
        let auth = self.guard.remove_pin(&mut next, &self.auth)?;
        self.commit_with_auth(next, auth)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn commit(&mut self, next: VaultContents) -> Result<()> {
        self.store.save(&next, &self.key)?;
        self.contents = next;
        Ok(())
    }

    fn commit_with_auth(&mut self, next: VaultContents, auth: Authorization) -> Result<()> {
        self.commit(next)?;
        self.auth = auth;
        Ok(())
    }
}

/// Secret names may hold anything except nothing.
fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SecError::InvalidSecretName(
            "secret name cannot be empty".into(),
        ));
    }
    Ok(())
}
