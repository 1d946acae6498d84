//! PIN gating for a loaded vault.
//!
//! The verifier lives in `VaultContents::pin_verifier`.  Once it is
//! set, changing or removing it takes an `Authorization`, and the only
//! way to obtain one is a successful `PinGuard::verify`.
//!
//! Note that the PIN gates access through this crate only: the vault
//! is already decrypted with the static key by the time the PIN is
//! checked.

use subtle::ConstantTimeEq;
use tracing::{info, warn};
use zeroize::Zeroize;

use super::attempts::AttemptState;
use super::source::PinSource;
use crate::crypto::{derive_hash, generate_salt, Argon2Params};
use crate::errors::{Result, SecError};
use crate::vault::{PinVerifier, VaultContents};

/// Proof that the PIN check passed (or that no PIN is set).
///
/// Only `PinGuard` can construct one.  It is bound to the verifier that
/// was checked and is refused for contents holding any other verifier.
#[derive(Debug)]
pub struct Authorization {
    verified: Option<PinVerifier>,
}

impl Authorization {
    fn for_contents(contents: &VaultContents) -> Self {
        Self {
            verified: contents.pin_verifier.clone(),
        }
    }

    fn check(&self, contents: &VaultContents) -> Result<()> {
        if self.verified == contents.pin_verifier {
            Ok(())
        } else {
            Err(SecError::CommandFailed(
                "PIN authorization does not belong to this vault".into(),
            ))
        }
    }
}

/// Hashes, checks, and rotates the vault PIN.
#[derive(Debug, Clone)]
pub struct PinGuard {
    params: Argon2Params,
    max_attempts: u32,
}

impl Default for PinGuard {
    fn default() -> Self {
        Self::new(Argon2Params::default(), Self::DEFAULT_MAX_ATTEMPTS)
    }
}

impl PinGuard {
    /// Consecutive wrong PINs allowed before lockout.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// `params` apply to newly hashed PINs; existing verifiers keep their
    /// own.  `max_attempts` is raised to 1 if given as 0.
    pub fn new(params: Argon2Params, max_attempts: u32) -> Self {
        Self {
            params,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns `true` if PIN gating is active.
    pub fn is_set(contents: &VaultContents) -> bool {
        contents.pin_verifier.is_some()
    }

    /// Store a verifier for `pin`.  Fails with `PinAlreadySet` if a PIN
    /// exists; use `change_pin` for that.
    ///
    /// Returns the authorization for the updated contents.
    pub fn set_pin(&self, contents: &mut VaultContents, pin: &str) -> Result<Authorization> {
        if Self::is_set(contents) {
            return Err(SecError::PinAlreadySet);
        }
        contents.pin_verifier = Some(self.hash_pin(pin)?);
        info!("PIN set");
        Ok(Authorization::for_contents(contents))
    }

    /// Replace the existing verifier with one for `pin`.
    pub fn change_pin(
        &self,
        contents: &mut VaultContents,
        auth: &Authorization,
        pin: &str,
    ) -> Result<Authorization> {
        if !Self::is_set(contents) {
            return Err(SecError::PinNotSet);
        }
        auth.check(contents)?;
        contents.pin_verifier = Some(self.hash_pin(pin)?);
        info!("PIN changed");
        Ok(Authorization::for_contents(contents))
    }

    /// Drop the verifier, turning PIN gating off.
    pub fn remove_pin(
        &self,
        contents: &mut VaultContents,
        auth: &Authorization,
    ) -> Result<Authorization> {
        if !Self::is_set(contents) {
            return Err(SecError::PinNotSet);
        }
        auth.check(contents)?;
        contents.pin_verifier = None;
        info!("PIN removed");
        Ok(Authorization::for_contents(contents))
    }

    /// Check the PIN, prompting up to `max_attempts` times.
    ///
    /// Succeeds immediately, without prompting, if no PIN is set.
    pub fn verify(
        &self,
        contents: &VaultContents,
        source: &mut dyn PinSource,
    ) -> Result<Authorization> {
        let Some(verifier) = &contents.pin_verifier else {
            return Ok(Authorization::for_contents(contents));
        };

        let mut state = AttemptState::start();
        while let AttemptState::Attempting(attempt) = state {
            let pin = source.read_pin(attempt, self.max_attempts)?;
            let matched = Self::matches(verifier, &pin)?;
            state = state.advance(matched, self.max_attempts);

            if let AttemptState::Attempting(next) = state {
                let remaining = self.max_attempts + 1 - next;
                warn!(attempt, remaining, "incorrect PIN");
                source.wrong_pin(remaining);
            }
        }

        match state {
            AttemptState::Authorized => {
                info!("PIN verified");
                Ok(Authorization::for_contents(contents))
            }
            _ => {
                warn!(attempts = self.max_attempts, "PIN locked out");
                Err(SecError::TooManyAttempts)
            }
        }
    }

    fn hash_pin(&self, pin: &str) -> Result<PinVerifier> {
        if pin.is_empty() {
            return Err(SecError::InvalidPin("PIN cannot be empty".into()));
        }
        let salt = generate_salt();
        let mut hash = derive_hash(pin.as_bytes(), &salt, &self.params)?;
        let verifier = PinVerifier {
            salt: salt.to_vec(),
            hash: hash.to_vec(),
            params: self.params,
        };
        hash.zeroize();
        Ok(verifier)
    }

    /// Hash `pin` with the verifier's salt and params and compare in
    /// constant time.
    fn matches(verifier: &PinVerifier, pin: &str) -> Result<bool> {
        let mut candidate = derive_hash(pin.as_bytes(), &verifier.salt, &verifier.params)?;
        let equal: bool = candidate.as_slice().ct_eq(verifier.hash.as_slice()).into();
        candidate.zeroize();
        Ok(equal)
    }
}
