//! On-disk persistence of the vault file.
//!
//! `VaultStore` owns the vault path and moves `VaultContents` to and
//! from disk through the codec in `format`.  Writes go to a sibling
//! temp file which is renamed over the target, so a crash mid-write
//! leaves either the old vault or the new one, never a truncated file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::contents::VaultContents;
use super::format;
use crate::crypto::VaultKey;
use crate::errors::{Result, SecError};
use crate::private_file;

/// Handle on a vault file path.
#[derive(Debug, Clone)]
pub struct VaultStore {
    path: PathBuf,
}

impl VaultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and decrypt the vault.
    ///
    /// A missing file is the first-run case and yields empty contents.
    /// Decoding errors propagate unchanged.
    pub fn load(&self, key: &VaultKey) -> Result<VaultContents> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no vault file yet, starting empty");
                return Ok(VaultContents::new());
            }
            Err(e) => return Err(SecError::io("read vault", &self.path)(e)),
        };

        let contents = format::decode(&data, key)?;
        debug!(
            path = %self.path.display(),
            entries = contents.entries.len(),
            "loaded vault"
        );
        Ok(contents)
    }

    /// Encrypt `contents` with a fresh nonce and replace the vault file
    /// atomically.
    ///
    /// On failure the previous vault file is untouched.
    pub fn save(&self, contents: &VaultContents, key: &VaultKey) -> Result<()> {
        let data = format::encode(contents, key)?;
        private_file::replace(&self.path, &data)?;

        debug!(
            path = %self.path.display(),
            entries = contents.entries.len(),
            bytes = data.len(),
            "saved vault"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key() -> VaultKey {
        VaultKey::new([0x11u8; 32])
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let store = VaultStore::new(dir.path().join("vault.enc"));
        store.save(&VaultContents::new(), &key()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["vault.enc".to_string()]);
    }

    #[test]
    fn save_replaces_stale_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = VaultStore::new(dir.path().join("vault.enc"));
        fs::write(dir.path().join(".vault.enc.tmp"), b"garbage").unwrap();

        store.save(&VaultContents::new(), &key()).unwrap();
        assert!(!dir.path().join(".vault.enc.tmp").exists());
        assert!(store.load(&key()).unwrap().entries.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn vault_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = VaultStore::new(dir.path().join("vault.enc"));
        store.save(&VaultContents::new(), &key()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn failed_save_keeps_previous_vault() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.enc");
        let store = VaultStore::new(&path);

        let mut contents = VaultContents::new();
        contents.entries.insert("a".into(), "1".into());
        store.save(&contents, &key()).unwrap();
        let before = fs::read(&path).unwrap();

        // A directory squatting on the temp path makes the write fail.
        fs::create_dir(dir.path().join(".vault.enc.tmp")).unwrap();
        contents.entries.insert("b".into(), "2".into());
        assert!(store.save(&contents, &key()).is_err());

        assert_eq!(fs::read(&path).unwrap(), before);
        let reloaded = store.load(&key()).unwrap();
        assert_eq!(reloaded.entries.len(), 1);
    }
}
