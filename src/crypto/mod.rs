//! Cryptographic primitives for sec.
//!
//! This module provides:
//! - XChaCha20-Poly1305 encryption and decryption (`encryption`)
//! - Argon2id PIN hashing (`kdf`)
//! - The zeroizing `VaultKey` wrapper (`keys`)
//! - The static key file manager (`keyfile`)

pub mod encryption;
pub mod kdf;
pub mod keyfile;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, KeyManager, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_hash, generate_salt, Argon2Params};
pub use keyfile::KeyManager;
pub use keys::{VaultKey, KEY_LEN};
