//! Argon2id hashing of PINs.
//!
//! PINs are short, so the hash has to be expensive to brute-force
//! offline.  The cost parameters travel with every stored hash, which
//! lets the configured cost change without invalidating old PINs.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SecError};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Hash length in bytes.
pub const HASH_LEN: usize = 32;

/// Lowest accepted memory cost, in KiB.
const MIN_MEMORY_KIB: u32 = 8 * 1024;

/// Argon2id cost settings, as configured and as stored in a verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Params {
    /// KiB of memory per hash.
    pub memory_kib: u32,
    /// Passes over memory.
    pub iterations: u32,
    /// Lanes.
    pub parallelism: u32,
}

impl Default for Argon2Params {
    /// 64 MiB, 3 passes, 4 lanes.
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl Argon2Params {
    /// Refuse costs too low to slow down a PIN search.
    pub fn validate(&self) -> Result<()> {
        let problem = if self.memory_kib < MIN_MEMORY_KIB {
            format!(
                "argon2 memory must be at least {MIN_MEMORY_KIB} KiB, got {}",
                self.memory_kib
            )
        } else if self.iterations == 0 {
            "argon2 iterations must be at least 1".to_string()
        } else if self.parallelism == 0 {
            "argon2 parallelism must be at least 1".to_string()
        } else {
            return Ok(());
        };
        Err(SecError::KeyDerivationFailed(problem))
    }

    fn to_argon2(self) -> Result<Argon2<'static>> {
        self.validate()?;
        let params = Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(HASH_LEN),
        )
        .map_err(|e| SecError::KeyDerivationFailed(format!("argon2 params: {e}")))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Argon2id hash of `secret` under `salt`; deterministic for equal inputs.
pub fn derive_hash(secret: &[u8], salt: &[u8], params: &Argon2Params) -> Result<[u8; HASH_LEN]> {
    let mut out = [0u8; HASH_LEN];
    params
        .to_argon2()?
        .hash_password_into(secret, salt, &mut out)
        .map_err(|e| SecError::KeyDerivationFailed(format!("argon2id: {e}")))?;
    Ok(out)
}

/// Fresh random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
