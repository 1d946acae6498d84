//! Vault codec: `VaultContents` <-> encrypted bytes.
//!
//! A vault file has this layout:
//!
//! ```text
//! [nonce: 24 bytes][XChaCha20-Poly1305 ciphertext of contents JSON][tag: 16 bytes]
//! ```
//!
//! The plaintext is the JSON serialization of `VaultContents`.  Nothing
//! outside the ciphertext identifies the file, so a vault is
//! indistinguishable from random bytes without the key.

use zeroize::Zeroizing;

use super::contents::{VaultContents, CONTENTS_VERSION};
use crate::crypto::{decrypt, encrypt, VaultKey};
use crate::errors::{Result, SecError};

/// Serialize and encrypt `contents` under `key` with a fresh nonce.
pub fn encode(contents: &VaultContents, key: &VaultKey) -> Result<Vec<u8>> {
    let plaintext = Zeroizing::new(
        serde_json::to_vec(contents)
            .map_err(|e| SecError::SerializationError(format!("vault contents: {e}")))?,
    );
    encrypt(key.as_bytes(), &plaintext)
}

/// Decrypt and parse bytes produced by `encode`.
///
/// Errors:
/// - `InvalidFormat` if the data is too short or the plaintext does not
///   match the contents schema.
/// - `AuthenticationFailed` if the tag does not verify.
pub fn decode(data: &[u8], key: &VaultKey) -> Result<VaultContents> {
    let plaintext = Zeroizing::new(decrypt(key.as_bytes(), data)?);

    let contents: VaultContents = serde_json::from_slice(&plaintext)
        .map_err(|e| SecError::InvalidFormat(format!("vault contents: {e}")))?;

    if contents.version > CONTENTS_VERSION {
        return Err(SecError::InvalidFormat(format!(
            "unsupported contents version {}, expected at most {CONTENTS_VERSION}",
            contents.version
        )));
    }

    Ok(contents)
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::encryption::NONCE_LEN;

    fn key() -> VaultKey {
        VaultKey::new([0x42u8; 32])
    }

    #[test]
    fn non_json_plaintext_is_a_format_error() {
        // Correctly authenticated bytes that are not a contents document.
        let sealed = encrypt(key().as_bytes(), b"not json").unwrap();
        let result = decode(&sealed, &key());
        assert!(matches!(result, Err(SecError::InvalidFormat(_))));
    }

    #[test]
    fn future_version_is_a_format_error() {
        let sealed = encrypt(key().as_bytes(), br#"{"version":99,"entries":{}}"#).unwrap();
        let result = decode(&sealed, &key());
        assert!(matches!(result, Err(SecError::InvalidFormat(_))));
    }

    #[test]
    fn short_input_is_a_format_error() {
        let result = decode(&[0u8; NONCE_LEN - 1], &key());
        assert!(matches!(result, Err(SecError::InvalidFormat(_))));
    }
}
