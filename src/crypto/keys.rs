//! The static vault key.

use zeroize::Zeroize;

/// Length of the vault key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// A wrapper around the 32-byte vault key that automatically zeroes
/// its memory when dropped.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Create a new `VaultKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VaultKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_does_not_print_key_bytes() {
        let key = VaultKey::new([0xABu8; KEY_LEN]);
        let shown = format!("{key:?}");
        assert_eq!(shown, "VaultKey(..)");
        assert!(!shown.contains("171"));
    }
}
