//! XChaCha20-Poly1305 authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 24-byte nonce and
//! prepends it to the ciphertext.  The 192-bit nonce is large enough
//! that random nonces never need a persisted counter.  `decrypt` splits
//! the nonce back out before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 24-byte nonce | ciphertext + 16-byte auth tag ]

use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};

use crate::errors::{Result, SecError};

/// Size of the XChaCha20-Poly1305 nonce in bytes.
pub const NONCE_LEN: usize = 24;

/// Size of the Poly1305 authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new_from_slice(key)
        .map_err(|e| SecError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| SecError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Input shorter than a nonce is a format error.  Anything else that
/// fails to open (wrong key, flipped byte, truncated tag) is rejected as
/// an authentication failure with no further detail.
pub fn decrypt(key: &[u8], ciphertext_with_nonce: &[u8]) -> Result<Vec<u8>> {
    if ciphertext_with_nonce.len() < NONCE_LEN {
        return Err(SecError::InvalidFormat(format!(
            "vault data too short: {} bytes, need at least {NONCE_LEN}",
            ciphertext_with_nonce.len()
        )));
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
    let nonce = XNonce::from_slice(nonce_bytes);

    let cipher =
        XChaCha20Poly1305::new_from_slice(key).map_err(|_| SecError::AuthenticationFailed)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| SecError::AuthenticationFailed)
}
