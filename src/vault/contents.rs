//! The plaintext structure sealed inside a vault file.
//!
//! User secrets and PIN metadata live in separate fields so that no
//! secret name is reserved and listings never need to filter anything
//! out.  The whole struct is serialized and encrypted as one unit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::format::{base64_decode, base64_encode};
use crate::crypto::Argon2Params;

/// Current version of the plaintext schema.
pub const CONTENTS_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONTENTS_VERSION
}

/// Salted Argon2id hash of the user's PIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinVerifier {
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub hash: Vec<u8>,

    /// Parameters the hash was produced with.
    pub params: Argon2Params,
}

/// Everything a vault holds: the secret mapping plus optional PIN metadata.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VaultContents {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Secret name -> secret value.  A `BTreeMap` keeps the serialized
    /// form canonical.
    pub entries: BTreeMap<String, String>,

    /// Present iff PIN gating is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) pin_verifier: Option<PinVerifier>,
}

impl Default for VaultContents {
    fn default() -> Self {
        Self {
            version: CONTENTS_VERSION,
            entries: BTreeMap::new(),
            pin_verifier: None,
        }
    }
}

impl VaultContents {
    /// Empty contents, as used on first run.
    pub fn new() -> Self {
        Self::default()
    }
}

// Values are secrets; keep them out of debug output.
impl std::fmt::Debug for VaultContents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultContents")
            .field("version", &self.version)
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .field("pin_set", &self.pin_verifier.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_values() {
        let mut contents = VaultContents::new();
        contents
            .entries
            .insert("db-password".into(), "s3cr3t".into());

        let shown = format!("{contents:?}");
        assert!(shown.contains("db-password"));
        assert!(!shown.contains("s3cr3t"));
    }

    #[test]
    fn json_omits_absent_pin() {
        let json = serde_json::to_string(&VaultContents::new()).unwrap();
        assert_eq!(json, r#"{"version":1,"entries":{}}"#);
    }

    #[test]
    fn flat_legacy_map_is_rejected() {
        let result: Result<VaultContents, _> = serde_json::from_str(r#"{"a":"b"}"#);
        assert!(result.is_err());
    }
}
